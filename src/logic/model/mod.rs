//! Model Module - Training, persistence and inference
//!
//! Synthetic data → scaler + estimator per hazard → versioned bundle on disk.
//! `PredictorService` owns the loaded predictor and handles retraining.

pub mod estimator;
pub mod scaler;
pub mod linear;
pub mod centroid;
pub mod synthetic;
pub mod training;
pub mod bundle;
pub mod storage;
pub mod forecast;
pub mod predictor;
pub mod service;

// Re-export common types
pub use estimator::{Estimator, ModelError, PointEstimator, ProbabilisticEstimator};
pub use bundle::{BundleInfo, ModelKind, ModelSlot, StoredBundle};
pub use storage::StorageError;
pub use training::{train_bundle, TrainingError, TrainingOptions};
pub use predictor::BlueGuardPredictor;
pub use service::{PredictorService, RetrainError, ServiceStatus, StartupError};
