//! BlueGuard ML Service
//!
//! Coastal hazard prediction: storm surge, coastal erosion, blue carbon
//! ecosystem threat and short-term weather trend, aggregated into one
//! threat analysis with recommendations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    BLUEGUARD ML SERVICE                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────────┐  ┌─────────────────┐  │
//! │  │  API      │  │  Threat Analysis │  │  Predictor      │  │
//! │  │  (Axum)   │─▶│  (aggregation,   │─▶│  Service        │  │
//! │  │           │  │  recommendations)│  │  (models)       │  │
//! │  └───────────┘  └──────────────────┘  └────────┬────────┘  │
//! │                                                ▼           │
//! │                                   ┌────────────────────┐   │
//! │                                   │ Model bundle (JSON │   │
//! │                                   │ + SHA-256 checksum)│   │
//! │                                   └────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use config::Config;
pub use error::{AppError, AppResult};
pub use logic::model::PredictorService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictorService>,
    pub config: Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let prediction_routes = Router::new()
        .route("/predict/storm-surge", post(handlers::predict::storm_surge))
        .route("/predict/coastal-erosion", post(handlers::predict::coastal_erosion))
        .route("/predict/blue-carbon", post(handlers::predict::blue_carbon))
        .route("/predict/weather", post(handlers::predict::weather))
        .route("/analyze/comprehensive", post(handlers::analyze::comprehensive));

    let management_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/retrain", post(handlers::retrain::retrain));

    Router::new()
        .merge(prediction_routes)
        .merge(management_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
