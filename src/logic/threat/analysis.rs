//! Comprehensive Threat Analysis
//!
//! Dispatches each present input section to its predictor, then aggregates.
//! Predictor failures become failure-shaped category results; an unexpected
//! panic inside orchestration becomes a top-level error on a partial analysis.

use std::panic::{self, AssertUnwindSafe};

use chrono::Utc;

use crate::logic::model::ModelError;
use crate::models::{CoastalInput, EcosystemInput, ThreatInput, WeatherInput, WeatherObservation};

use super::classifier::calculate_overall_risk;
use super::recommendations::generate_recommendations;
use super::results::{
    BlueCarbonPrediction, ErosionPrediction, PredictionResult, SurgePrediction, ThreatAnalysis,
    WeatherForecast,
};
use super::rules::RecommendationDetail;
use super::types::Category;

// ============================================================================
// PREDICTOR INTERFACE
// ============================================================================

/// Why a category prediction could not be produced
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("{0}")]
    ModelUnavailable(&'static str),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Model-backed collaborator that produces one payload per category
pub trait HazardPredictor {
    fn predict_storm_surge(&self, weather: &WeatherInput) -> Result<SurgePrediction, PredictError>;

    fn predict_coastal_erosion(&self, coastal: &CoastalInput) -> Result<ErosionPrediction, PredictError>;

    fn predict_blue_carbon(&self, ecosystem: &EcosystemInput) -> Result<BlueCarbonPrediction, PredictError>;

    fn forecast_weather(&self, history: &[WeatherObservation]) -> Result<WeatherForecast, PredictError>;
}

/// Convert a predictor outcome into the category result shape
pub fn into_result<T>(
    category: Category,
    outcome: Result<T, PredictError>,
    wrap: impl FnOnce(T) -> PredictionResult,
) -> PredictionResult {
    match outcome {
        Ok(payload) => wrap(payload),
        Err(e) => {
            tracing::warn!("{} prediction failed: {}", category, e);
            PredictionResult::failed(category, e.to_string())
        }
    }
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run every predictor whose section is present and aggregate the results.
///
/// Never fails: problems are reported inside the returned analysis.
pub fn analyze<P>(predictor: &P, input: &ThreatInput, detail: RecommendationDetail) -> ThreatAnalysis
where
    P: HazardPredictor + ?Sized,
{
    let mut analysis = ThreatAnalysis::started_at(Utc::now());

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        run_categories(predictor, input, &mut analysis);

        analysis.overall_risk = calculate_overall_risk(&analysis.threats);
        analysis.recommendations = generate_recommendations(&analysis.threats, detail);
    }));

    if let Err(payload) = outcome {
        let message = panic_message(payload.as_ref());
        tracing::error!("Comprehensive analysis error: {}", message);
        analysis.error = Some(message);
    }

    analysis
}

fn run_categories<P>(predictor: &P, input: &ThreatInput, analysis: &mut ThreatAnalysis)
where
    P: HazardPredictor + ?Sized,
{
    if let Some(weather) = &input.weather {
        let result = into_result(
            Category::StormSurge,
            predictor.predict_storm_surge(weather),
            PredictionResult::StormSurge,
        );
        analysis.threats.insert(Category::StormSurge, result);
    }

    if let Some(coastal) = &input.coastal {
        let result = into_result(
            Category::CoastalErosion,
            predictor.predict_coastal_erosion(coastal),
            PredictionResult::CoastalErosion,
        );
        analysis.threats.insert(Category::CoastalErosion, result);
    }

    if let Some(ecosystem) = &input.ecosystem {
        let result = into_result(
            Category::BlueCarbon,
            predictor.predict_blue_carbon(ecosystem),
            PredictionResult::BlueCarbon,
        );
        analysis.threats.insert(Category::BlueCarbon, result);
    }

    if let Some(history) = &input.historical_weather {
        let result = into_result(
            Category::WeatherForecast,
            predictor.forecast_weather(history),
            PredictionResult::WeatherForecast,
        );
        analysis.threats.insert(Category::WeatherForecast, result);
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "analysis aborted unexpectedly".to_string()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::carbon::estimate_carbon_loss;
    use crate::logic::threat::classifier::categorize_surge_risk;
    use crate::logic::threat::results::{Probabilities, BASE_ANALYSIS_CONFIDENCE};
    use crate::logic::threat::rules::{REC_EROSION_PROTECTION, REC_SURGE_WARNING};
    use crate::logic::threat::types::OverallRisk;

    /// Fixed-output predictor with switchable failure modes
    #[derive(Default)]
    struct StubPredictor {
        surge_height: f64,
        erosion_level: &'static str,
        threat_level: &'static str,
        fail_blue_carbon: bool,
        panic_on_erosion: bool,
    }

    impl HazardPredictor for StubPredictor {
        fn predict_storm_surge(&self, _weather: &WeatherInput) -> Result<SurgePrediction, PredictError> {
            Ok(SurgePrediction {
                surge_height: self.surge_height,
                confidence: 0.9,
                risk_level: categorize_surge_risk(self.surge_height),
            })
        }

        fn predict_coastal_erosion(&self, _coastal: &CoastalInput) -> Result<ErosionPrediction, PredictError> {
            if self.panic_on_erosion {
                panic!("erosion model corrupted");
            }
            Ok(ErosionPrediction {
                risk_level: self.erosion_level.to_string(),
                confidence: 0.7,
                probabilities: Probabilities::new(),
            })
        }

        fn predict_blue_carbon(&self, ecosystem: &EcosystemInput) -> Result<BlueCarbonPrediction, PredictError> {
            if self.fail_blue_carbon {
                return Err(PredictError::ModelUnavailable("Blue carbon model not available"));
            }
            Ok(BlueCarbonPrediction {
                threat_level: self.threat_level.to_string(),
                confidence: 0.5,
                probabilities: Probabilities::new(),
                carbon_loss_estimate: estimate_carbon_loss(self.threat_level, ecosystem),
            })
        }

        fn forecast_weather(&self, _history: &[WeatherObservation]) -> Result<WeatherForecast, PredictError> {
            Ok(WeatherForecast {
                predictions: vec![],
                confidence: 0.6,
            })
        }
    }

    fn input(json: serde_json::Value) -> ThreatInput {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_only_present_sections_are_analyzed() {
        let predictor = StubPredictor {
            erosion_level: "high",
            ..Default::default()
        };
        let analysis = analyze(&predictor, &input(serde_json::json!({"coastal": {}})), RecommendationDetail::Detailed);

        assert_eq!(analysis.threats.categories(), vec![Category::CoastalErosion]);
        assert_eq!(analysis.overall_risk, OverallRisk::High);
        assert!(analysis.error.is_none());
    }

    #[test]
    fn test_categories_fill_in_fixed_order() {
        let predictor = StubPredictor {
            surge_height: 1.5,
            erosion_level: "critical",
            threat_level: "minimal",
            ..Default::default()
        };
        let analysis = analyze(
            &predictor,
            &input(serde_json::json!({
                "historical_weather": [],
                "ecosystem": {},
                "coastal": {},
                "weather": {}
            })),
            RecommendationDetail::Concise,
        );

        assert_eq!(
            analysis.threats.categories(),
            vec![
                Category::StormSurge,
                Category::CoastalErosion,
                Category::BlueCarbon,
                Category::WeatherForecast,
            ]
        );
        // ranks 3, 4, 1 => mean 2.67
        assert_eq!(analysis.overall_risk, OverallRisk::High);
        assert_eq!(
            analysis.recommendations,
            vec![REC_SURGE_WARNING.to_string(), REC_EROSION_PROTECTION.to_string()]
        );
    }

    #[test]
    fn test_weather_forecast_never_ranks() {
        let predictor = StubPredictor::default();
        let analysis = analyze(
            &predictor,
            &input(serde_json::json!({"historical_weather": [{"temperature": 30}]})),
            RecommendationDetail::Detailed,
        );

        assert_eq!(analysis.overall_risk, OverallRisk::Unknown);
        assert!(analysis.recommendations.is_empty());
        assert_eq!(analysis.confidence, BASE_ANALYSIS_CONFIDENCE);
    }

    #[test]
    fn test_weather_history_leaves_confidence_unchanged() {
        let predictor = StubPredictor::default();
        let coastal_only = analyze(
            &predictor,
            &input(serde_json::json!({"coastal": {"wave_energy": 12}})),
            RecommendationDetail::Detailed,
        );
        let with_history = analyze(
            &predictor,
            &input(serde_json::json!({"coastal": {"wave_energy": 12}, "historical_weather": []})),
            RecommendationDetail::Detailed,
        );

        assert_eq!(coastal_only.confidence, BASE_ANALYSIS_CONFIDENCE);
        assert_eq!(with_history.confidence, coastal_only.confidence);
        assert_eq!(with_history.overall_risk, coastal_only.overall_risk);
    }

    #[test]
    fn test_component_failure_is_not_top_level_error() {
        let predictor = StubPredictor {
            fail_blue_carbon: true,
            ..Default::default()
        };
        let analysis = analyze(&predictor, &input(serde_json::json!({"ecosystem": {}})), RecommendationDetail::Detailed);

        let blue_carbon = analysis.threats.get(Category::BlueCarbon).unwrap();
        assert_eq!(blue_carbon.error(), Some("Blue carbon model not available"));
        assert_eq!(analysis.overall_risk, OverallRisk::Unknown);
        assert!(analysis.error.is_none());
        assert!(analysis.recommendations.is_empty());

        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["threats"]["blue_carbon"]["threat_level"], "unknown");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_orchestration_panic_becomes_top_level_error() {
        let predictor = StubPredictor {
            surge_height: 1.5,
            panic_on_erosion: true,
            ..Default::default()
        };
        let analysis = analyze(
            &predictor,
            &input(serde_json::json!({"weather": {}, "coastal": {}})),
            RecommendationDetail::Detailed,
        );

        assert_eq!(analysis.error.as_deref(), Some("erosion model corrupted"));
        // partial result keeps what was collected before the failure
        assert_eq!(analysis.threats.categories(), vec![Category::StormSurge]);
        assert_eq!(analysis.overall_risk, OverallRisk::Low);
        assert!(analysis.recommendations.is_empty());
    }

    #[test]
    fn test_empty_input_yields_unknown() {
        let analysis = analyze(&StubPredictor::default(), &ThreatInput::default(), RecommendationDetail::Detailed);
        assert!(analysis.threats.is_empty());
        assert_eq!(analysis.overall_risk, OverallRisk::Unknown);
        assert!((analysis.confidence - 0.8).abs() < 1e-9);
    }
}
