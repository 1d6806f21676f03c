//! Comprehensive analysis handler

use axum::{extract::State, Json};

use crate::handlers::ApiJson;
use crate::logic::threat::{analyze, ThreatAnalysis};
use crate::models::ThreatInput;
use crate::AppState;

/// POST /analyze/comprehensive
pub async fn comprehensive(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ThreatInput>,
) -> Json<ThreatAnalysis> {
    let predictor = state.service.predictor();
    let analysis = analyze(predictor.as_ref(), &input, state.config.recommendation_detail);

    tracing::debug!(
        "Comprehensive analysis: {} categories, overall {}",
        analysis.threats.len(),
        analysis.overall_risk
    );

    Json(analysis)
}
