//! Single-category prediction handlers
//!
//! Component failures (e.g. a missing model) are reported inside a 200
//! response via the result's `error` field.

use axum::{extract::State, Json};

use crate::handlers::ApiJson;
use crate::logic::threat::analysis::into_result;
use crate::logic::threat::{Category, HazardPredictor, PredictionResult};
use crate::models::{CoastalInput, EcosystemInput, WeatherInput, WeatherRequest};
use crate::AppState;

/// POST /predict/storm-surge
pub async fn storm_surge(
    State(state): State<AppState>,
    ApiJson(weather): ApiJson<WeatherInput>,
) -> Json<PredictionResult> {
    let predictor = state.service.predictor();
    Json(into_result(
        Category::StormSurge,
        predictor.predict_storm_surge(&weather),
        PredictionResult::StormSurge,
    ))
}

/// POST /predict/coastal-erosion
pub async fn coastal_erosion(
    State(state): State<AppState>,
    ApiJson(coastal): ApiJson<CoastalInput>,
) -> Json<PredictionResult> {
    let predictor = state.service.predictor();
    Json(into_result(
        Category::CoastalErosion,
        predictor.predict_coastal_erosion(&coastal),
        PredictionResult::CoastalErosion,
    ))
}

/// POST /predict/blue-carbon
pub async fn blue_carbon(
    State(state): State<AppState>,
    ApiJson(ecosystem): ApiJson<EcosystemInput>,
) -> Json<PredictionResult> {
    let predictor = state.service.predictor();
    Json(into_result(
        Category::BlueCarbon,
        predictor.predict_blue_carbon(&ecosystem),
        PredictionResult::BlueCarbon,
    ))
}

/// POST /predict/weather
pub async fn weather(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<WeatherRequest>,
) -> Json<PredictionResult> {
    let predictor = state.service.predictor();
    Json(into_result(
        Category::WeatherForecast,
        predictor.forecast_weather(&request.historical_data),
        PredictionResult::WeatherForecast,
    ))
}
