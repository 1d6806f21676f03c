//! Recommendation Generator
//!
//! Category-specific threshold rules, applied in category insertion order.
//! Failed categories and categories without rules contribute nothing.

use super::results::{CategoryResults, PredictionResult};
use super::rules::{
    RecommendationDetail, REC_CARBON_PROTOCOL, REC_CARBON_RESPONSE, REC_EROSION_ACCESS,
    REC_EROSION_PROTECTION, REC_SURGE_MONITOR, REC_SURGE_RESPONSE, REC_SURGE_WARNING,
    SURGE_MONITOR_MIN, SURGE_WARNING_MIN,
};
use super::types::{Category, RiskLevel, ThreatLevel};

/// Generate actionable recommendations. Returns an empty list when no rule fires.
pub fn generate_recommendations(
    threats: &CategoryResults,
    detail: RecommendationDetail,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    for (category, result) in threats.iter() {
        if result.is_error() {
            continue;
        }

        let fired: &[&str] = match category {
            Category::StormSurge => storm_surge_rule(result, detail),
            Category::CoastalErosion => coastal_erosion_rule(result, detail),
            Category::BlueCarbon => blue_carbon_rule(result, detail),
            Category::WeatherForecast => &[],
        };

        recommendations.extend(fired.iter().map(|r| r.to_string()));
    }

    recommendations
}

fn storm_surge_rule(result: &PredictionResult, detail: RecommendationDetail) -> &'static [&'static str] {
    let surge_height = result.surge_height().unwrap_or(0.0);

    if surge_height > SURGE_WARNING_MIN {
        match detail {
            RecommendationDetail::Detailed => &[REC_SURGE_WARNING, REC_SURGE_RESPONSE],
            RecommendationDetail::Concise => &[REC_SURGE_WARNING],
        }
    } else if surge_height > SURGE_MONITOR_MIN {
        &[REC_SURGE_MONITOR]
    } else {
        &[]
    }
}

fn coastal_erosion_rule(result: &PredictionResult, detail: RecommendationDetail) -> &'static [&'static str] {
    let elevated = result
        .risk_level()
        .and_then(|label| label.parse::<RiskLevel>().ok())
        .is_some_and(|level| level.is_elevated());

    match (elevated, detail) {
        (false, _) => &[],
        (true, RecommendationDetail::Detailed) => &[REC_EROSION_PROTECTION, REC_EROSION_ACCESS],
        (true, RecommendationDetail::Concise) => &[REC_EROSION_PROTECTION],
    }
}

fn blue_carbon_rule(result: &PredictionResult, detail: RecommendationDetail) -> &'static [&'static str] {
    let elevated = result
        .threat_level()
        .and_then(|label| label.parse::<ThreatLevel>().ok())
        .is_some_and(|level| level.is_elevated());

    match (elevated, detail) {
        (false, _) => &[],
        (true, RecommendationDetail::Detailed) => &[REC_CARBON_PROTOCOL, REC_CARBON_RESPONSE],
        (true, RecommendationDetail::Concise) => &[REC_CARBON_PROTOCOL],
    }
}
