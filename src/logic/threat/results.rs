//! Prediction Results
//!
//! Per-category outputs and the aggregated analysis they feed into.
//! Results are built once and never mutated afterwards.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::types::{Category, OverallRisk, RiskLevel};

/// Label → probability, as reported by probabilistic classifiers
pub type Probabilities = BTreeMap<String, f64>;

// ============================================================================
// CATEGORY PAYLOADS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurgePrediction {
    /// Predicted surge height in meters (never negative)
    pub surge_height: f64,
    pub confidence: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErosionPrediction {
    pub risk_level: String,
    pub confidence: f64,
    pub probabilities: Probabilities,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarbonLossEstimate {
    pub potential_loss_tons_co2: f64,
    pub economic_value_usd: f64,
    pub recovery_time_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlueCarbonPrediction {
    pub threat_level: String,
    pub confidence: f64,
    pub probabilities: Probabilities,
    pub carbon_loss_estimate: CarbonLossEstimate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub hour_offset: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherForecast {
    pub predictions: Vec<ForecastPoint>,
    pub confidence: f64,
}

// ============================================================================
// FAILURE SHAPE
// ============================================================================

/// Sentinel label reported in place of a level when prediction failed
pub const UNKNOWN_LABEL: &str = "unknown";

/// A failed category prediction: the error plus the category's sentinel value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionFailure {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surge_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threat_level: Option<&'static str>,
}

impl PredictionFailure {
    pub fn new(category: Category, error: impl Into<String>) -> Self {
        let mut failure = Self {
            error: error.into(),
            surge_height: None,
            risk_level: None,
            threat_level: None,
        };
        match category {
            Category::StormSurge => failure.surge_height = Some(0.0),
            Category::CoastalErosion => failure.risk_level = Some(UNKNOWN_LABEL),
            Category::BlueCarbon => failure.threat_level = Some(UNKNOWN_LABEL),
            Category::WeatherForecast => {}
        }
        failure
    }
}

// ============================================================================
// PREDICTION RESULT
// ============================================================================

/// Output of one category predictor, success or failure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionResult {
    Failed(PredictionFailure),
    StormSurge(SurgePrediction),
    CoastalErosion(ErosionPrediction),
    BlueCarbon(BlueCarbonPrediction),
    WeatherForecast(WeatherForecast),
}

impl PredictionResult {
    pub fn failed(category: Category, error: impl Into<String>) -> Self {
        PredictionResult::Failed(PredictionFailure::new(category, error))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PredictionResult::Failed(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PredictionResult::Failed(failure) => Some(failure.error.as_str()),
            _ => None,
        }
    }

    pub fn surge_height(&self) -> Option<f64> {
        match self {
            PredictionResult::StormSurge(p) => Some(p.surge_height),
            _ => None,
        }
    }

    pub fn risk_level(&self) -> Option<&str> {
        match self {
            PredictionResult::StormSurge(p) => Some(p.risk_level.as_str()),
            PredictionResult::CoastalErosion(p) => Some(p.risk_level.as_str()),
            _ => None,
        }
    }

    pub fn threat_level(&self) -> Option<&str> {
        match self {
            PredictionResult::BlueCarbon(p) => Some(p.threat_level.as_str()),
            _ => None,
        }
    }

    /// The ordinal label used for ranking: `risk_level`, else `threat_level`.
    /// Failures have none.
    pub fn ordinal_label(&self) -> Option<&str> {
        if self.is_error() {
            return None;
        }
        self.risk_level().or_else(|| self.threat_level())
    }
}

// ============================================================================
// CATEGORY RESULTS (insertion-ordered)
// ============================================================================

/// Category → result mapping that iterates and serializes in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryResults {
    entries: Vec<(Category, PredictionResult)>,
}

impl CategoryResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a result; re-inserting a category replaces it in place
    pub fn insert(&mut self, category: Category, result: PredictionResult) {
        match self.entries.iter_mut().find(|(c, _)| *c == category) {
            Some(entry) => entry.1 = result,
            None => self.entries.push((category, result)),
        }
    }

    pub fn get(&self, category: Category) -> Option<&PredictionResult> {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &PredictionResult)> {
        self.entries.iter().map(|(c, r)| (*c, r))
    }

    pub fn categories(&self) -> Vec<Category> {
        self.entries.iter().map(|(c, _)| *c).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Category, PredictionResult)> for CategoryResults {
    fn from_iter<I: IntoIterator<Item = (Category, PredictionResult)>>(iter: I) -> Self {
        let mut results = CategoryResults::new();
        for (category, result) in iter {
            results.insert(category, result);
        }
        results
    }
}

impl Serialize for CategoryResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, result) in &self.entries {
            map.serialize_entry(category.key(), result)?;
        }
        map.end()
    }
}

// ============================================================================
// THREAT ANALYSIS
// ============================================================================

/// Aggregate confidence; category results do not move it
pub const BASE_ANALYSIS_CONFIDENCE: f64 = 0.8;

/// Aggregated multi-category analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatAnalysis {
    pub timestamp: DateTime<Utc>,
    pub overall_risk: OverallRisk,
    pub confidence: f64,
    pub threats: CategoryResults,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ThreatAnalysis {
    /// Fresh analysis with the defaults a partial result falls back to
    pub fn started_at(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            overall_risk: OverallRisk::Low,
            confidence: BASE_ANALYSIS_CONFIDENCE,
            threats: CategoryResults::new(),
            recommendations: Vec::new(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn surge(height: f64) -> PredictionResult {
        PredictionResult::StormSurge(SurgePrediction {
            surge_height: height,
            confidence: 0.9,
            risk_level: RiskLevel::High,
        })
    }

    #[test]
    fn test_failure_sentinels_per_category() {
        let value = serde_json::to_value(PredictionResult::failed(Category::StormSurge, "boom")).unwrap();
        assert_eq!(value, json!({"error": "boom", "surge_height": 0.0}));

        let value = serde_json::to_value(PredictionResult::failed(Category::CoastalErosion, "boom")).unwrap();
        assert_eq!(value, json!({"error": "boom", "risk_level": "unknown"}));

        let value = serde_json::to_value(PredictionResult::failed(Category::BlueCarbon, "boom")).unwrap();
        assert_eq!(value, json!({"error": "boom", "threat_level": "unknown"}));

        let value = serde_json::to_value(PredictionResult::failed(Category::WeatherForecast, "boom")).unwrap();
        assert_eq!(value, json!({"error": "boom"}));
    }

    #[test]
    fn test_failure_has_no_ordinal_label() {
        let failed = PredictionResult::failed(Category::CoastalErosion, "model missing");
        assert!(failed.is_error());
        assert_eq!(failed.ordinal_label(), None);
    }

    #[test]
    fn test_ordinal_label_prefers_risk_level() {
        assert_eq!(surge(1.5).ordinal_label(), Some("high"));

        let carbon = PredictionResult::BlueCarbon(BlueCarbonPrediction {
            threat_level: "severe".to_string(),
            confidence: 0.7,
            probabilities: Probabilities::new(),
            carbon_loss_estimate: CarbonLossEstimate {
                potential_loss_tons_co2: 60.0,
                economic_value_usd: 3000.0,
                recovery_time_years: 6.0,
            },
        });
        assert_eq!(carbon.ordinal_label(), Some("severe"));
    }

    #[test]
    fn test_category_results_keep_insertion_order() {
        let mut results = CategoryResults::new();
        results.insert(Category::CoastalErosion, PredictionResult::failed(Category::CoastalErosion, "x"));
        results.insert(Category::StormSurge, surge(0.2));
        results.insert(Category::CoastalErosion, surge(0.3));

        assert_eq!(results.categories(), vec![Category::CoastalErosion, Category::StormSurge]);
        assert_eq!(results.get(Category::CoastalErosion).and_then(|r| r.surge_height()), Some(0.3));

        let text = serde_json::to_string(&results).unwrap();
        let erosion = text.find("coastal_erosion").unwrap();
        let storm = text.find("storm_surge").unwrap();
        assert!(erosion < storm);
    }

    #[test]
    fn test_analysis_omits_absent_error() {
        let analysis = ThreatAnalysis::started_at(Utc::now());
        let value = serde_json::to_value(&analysis).unwrap();
        assert!(value.get("error").is_none());
        assert_eq!(value["overall_risk"], "low");
        assert_eq!(value["recommendations"], json!([]));
    }
}
