//! Predictor Service
//!
//! Owns the active predictor. Readers take an `Arc` snapshot; a retrain
//! builds a complete new predictor and swaps it in. One retrain at a time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use uuid::Uuid;

use super::bundle::{BundleInfo, StoredBundle};
use super::predictor::BlueGuardPredictor;
use super::storage::{load_bundle, save_bundle, StorageError};
use super::training::{train_bundle, TrainingError, TrainingOptions};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to train initial models: {0}")]
    Training(#[from] TrainingError),

    #[error("failed to save initial models: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, thiserror::Error)]
pub enum RetrainError {
    #[error("Retraining already in progress")]
    InProgress,

    #[error("Training failed: {0}")]
    Training(#[from] TrainingError),

    #[error("Saving models failed: {0}")]
    Storage(#[from] StorageError),
}

/// Snapshot for `/health`
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub models_loaded: usize,
    pub available_models: Vec<&'static str>,
    pub model_version: Option<Uuid>,
    pub trained_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct PredictorService {
    predictor: RwLock<Arc<BlueGuardPredictor>>,
    models_path: PathBuf,
    retrain_lock: Mutex<()>,
}

impl PredictorService {
    pub fn new(predictor: BlueGuardPredictor, models_path: impl Into<PathBuf>) -> Self {
        Self {
            predictor: RwLock::new(Arc::new(predictor)),
            models_path: models_path.into(),
            retrain_lock: Mutex::new(()),
        }
    }

    /// Load saved models, or train and save a fresh bundle if none is usable
    pub fn initialize(models_path: &Path, options: TrainingOptions) -> Result<Self, StartupError> {
        let bundle = match load_bundle(models_path) {
            Ok(bundle) => {
                tracing::info!("Loaded models {} from {}", bundle.version, models_path.display());
                bundle
            }
            Err(StorageError::NotFound(_)) => {
                tracing::info!("No saved models found, training new models...");
                Self::train_and_save(models_path, &options)?
            }
            Err(e) => {
                tracing::warn!("Saved models unusable ({}), training new models...", e);
                Self::train_and_save(models_path, &options)?
            }
        };

        Ok(Self::new(BlueGuardPredictor::from(bundle), models_path))
    }

    fn train_and_save(models_path: &Path, options: &TrainingOptions) -> Result<StoredBundle, StartupError> {
        let bundle = train_bundle(options)?;
        save_bundle(&bundle, models_path)?;
        Ok(bundle)
    }

    /// Current predictor; stays valid across a concurrent swap
    pub fn predictor(&self) -> Arc<BlueGuardPredictor> {
        self.predictor.read().clone()
    }

    /// Train, save, then swap. Rejected while another retrain runs.
    pub fn retrain(&self, options: TrainingOptions) -> Result<BundleInfo, RetrainError> {
        let _guard = self.retrain_lock.try_lock().ok_or(RetrainError::InProgress)?;

        let bundle = train_bundle(&options)?;
        save_bundle(&bundle, &self.models_path)?;

        let info = BundleInfo {
            version: bundle.version,
            trained_at: bundle.trained_at,
        };
        *self.predictor.write() = Arc::new(BlueGuardPredictor::from(bundle));

        tracing::info!("Models retrained successfully (version {})", info.version);
        Ok(info)
    }

    pub fn status(&self) -> ServiceStatus {
        let predictor = self.predictor();
        let info = predictor.info();

        ServiceStatus {
            models_loaded: predictor.models_loaded(),
            available_models: predictor.available_models(),
            model_version: info.map(|i| i.version),
            trained_at: info.map(|i| i.trained_at),
        }
    }
}
