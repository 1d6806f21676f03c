//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::logic::model::RetrainError;

pub type AppResult<T> = Result<T, AppError>;

/// Request-level failures. Every variant answers 500 with `{"error": msg}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Request errors
    #[error("{0}")]
    InvalidJson(String),
    #[error("{0}")]
    ValidationError(String),

    // Retraining errors
    #[error("Retraining already in progress")]
    RetrainInProgress,
    #[error("{0}")]
    RetrainFailed(String),

    // Generic errors
    #[error("{0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidJson(msg) | AppError::ValidationError(msg) => {
                tracing::warn!("Rejected request: {}", msg);
            }
            AppError::RetrainInProgress => {
                tracing::warn!("Retrain requested while another is running");
            }
            AppError::RetrainFailed(msg) => {
                tracing::error!("Retrain error: {}", msg);
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
            }
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidJson(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

impl From<RetrainError> for AppError {
    fn from(err: RetrainError) -> Self {
        match err {
            RetrainError::InProgress => AppError::RetrainInProgress,
            other => AppError::RetrainFailed(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_is_500() {
        for err in [
            AppError::InvalidJson("bad".into()),
            AppError::RetrainInProgress,
            AppError::InternalError("boom".into()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_retrain_errors_map() {
        assert!(matches!(AppError::from(RetrainError::InProgress), AppError::RetrainInProgress));
        assert_eq!(AppError::RetrainInProgress.to_string(), "Retraining already in progress");
        assert_eq!(AppError::InvalidJson("bad body".into()).to_string(), "bad body");
    }
}
