//! Retraining handler

use axum::{body::Bytes, extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::logic::model::TrainingOptions;
use crate::models::RetrainRequest;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct RetrainResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub model_version: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Body is optional; an empty body retrains with the configured defaults
fn parse_request(body: &[u8]) -> AppResult<RetrainRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RetrainRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::InvalidJson(e.to_string()))
}

/// POST /retrain
pub async fn retrain(State(state): State<AppState>, body: Bytes) -> AppResult<Json<RetrainResponse>> {
    let request = parse_request(&body)?;
    request.validate()?;

    let defaults = state.config.training_options();
    let options = TrainingOptions {
        num_samples: request.num_samples.unwrap_or(defaults.num_samples),
        seed: request.seed.unwrap_or(defaults.seed),
    };

    tracing::info!("Retraining requested ({} samples)", options.num_samples);

    let service = state.service.clone();
    let info = tokio::task::spawn_blocking(move || service.retrain(options)).await??;

    Ok(Json(RetrainResponse {
        status: "success",
        message: "Models retrained successfully",
        model_version: info.version,
        timestamp: Utc::now(),
    }))
}
