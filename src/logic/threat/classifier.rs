//! Risk Classifier
//!
//! Maps continuous predictions and per-category labels onto ordinal levels.
//! Input: surge heights, CategoryResults
//! Output: RiskLevel / OverallRisk

use super::results::CategoryResults;
use super::rules::{
    MEAN_RANK_HIGH_MAX, MEAN_RANK_LOW_MAX, MEAN_RANK_MEDIUM_MAX, SURGE_CRITICAL_MIN,
    SURGE_HIGH_MIN, SURGE_MEDIUM_MIN,
};
use super::types::{rank_of, OverallRisk, RiskLevel};

// ============================================================================
// SURGE CATEGORIZATION
// ============================================================================

/// Categorize a surge height (meters) into a risk level.
///
/// Total over all reals: negatives and NaN fall into `Low`.
pub fn categorize_surge_risk(surge_height: f64) -> RiskLevel {
    if surge_height >= SURGE_CRITICAL_MIN {
        RiskLevel::Critical
    } else if surge_height >= SURGE_HIGH_MIN {
        RiskLevel::High
    } else if surge_height >= SURGE_MEDIUM_MIN {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

// ============================================================================
// OVERALL RISK
// ============================================================================

/// Classify a mean rank back into a level
pub fn classify_mean_rank(mean: f64) -> RiskLevel {
    if mean < MEAN_RANK_LOW_MAX {
        RiskLevel::Low
    } else if mean < MEAN_RANK_MEDIUM_MAX {
        RiskLevel::Medium
    } else if mean < MEAN_RANK_HIGH_MAX {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

/// Ranks of every non-failed result that carries a label, in iteration order
pub fn collect_ranks(threats: &CategoryResults) -> Vec<u8> {
    threats
        .iter()
        .filter_map(|(_, result)| result.ordinal_label())
        .map(rank_of)
        .collect()
}

/// Overall risk as the mean rank of all labelled results.
///
/// Averaging, not worst case: high + high + low is `Medium`.
pub fn calculate_overall_risk(threats: &CategoryResults) -> OverallRisk {
    let ranks = collect_ranks(threats);
    if ranks.is_empty() {
        return OverallRisk::Unknown;
    }

    let mean = ranks.iter().map(|&r| f64::from(r)).sum::<f64>() / ranks.len() as f64;
    classify_mean_rank(mean).into()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::threat::results::{
        ErosionPrediction, PredictionResult, Probabilities, SurgePrediction, WeatherForecast,
    };
    use crate::logic::threat::types::Category;

    fn erosion(level: &str, confidence: f64) -> PredictionResult {
        PredictionResult::CoastalErosion(ErosionPrediction {
            risk_level: level.to_string(),
            confidence,
            probabilities: Probabilities::new(),
        })
    }

    fn surge(height: f64) -> PredictionResult {
        PredictionResult::StormSurge(SurgePrediction {
            surge_height: height,
            confidence: 0.9,
            risk_level: categorize_surge_risk(height),
        })
    }

    #[test]
    fn test_surge_boundaries() {
        assert_eq!(categorize_surge_risk(-3.0), RiskLevel::Low);
        assert_eq!(categorize_surge_risk(0.0), RiskLevel::Low);
        assert_eq!(categorize_surge_risk(0.499), RiskLevel::Low);
        assert_eq!(categorize_surge_risk(0.5), RiskLevel::Medium);
        assert_eq!(categorize_surge_risk(0.999), RiskLevel::Medium);
        assert_eq!(categorize_surge_risk(1.0), RiskLevel::High);
        assert_eq!(categorize_surge_risk(1.999), RiskLevel::High);
        assert_eq!(categorize_surge_risk(2.0), RiskLevel::Critical);
        assert_eq!(categorize_surge_risk(2.5), RiskLevel::Critical);
        assert_eq!(categorize_surge_risk(f64::NAN), RiskLevel::Low);
    }

    #[test]
    fn test_mean_rank_boundaries() {
        assert_eq!(classify_mean_rank(1.0), RiskLevel::Low);
        assert_eq!(classify_mean_rank(1.5), RiskLevel::Medium);
        assert_eq!(classify_mean_rank(2.49), RiskLevel::Medium);
        assert_eq!(classify_mean_rank(2.5), RiskLevel::High);
        assert_eq!(classify_mean_rank(3.5), RiskLevel::Critical);
    }

    #[test]
    fn test_overall_risk_averages_instead_of_max() {
        // high, high, low => mean 2.33
        let threats: CategoryResults = vec![
            (Category::StormSurge, surge(1.5)),
            (Category::CoastalErosion, erosion("high", 0.8)),
            (Category::BlueCarbon, PredictionResult::StormSurge(SurgePrediction {
                surge_height: 0.1,
                confidence: 0.6,
                risk_level: RiskLevel::Low,
            })),
        ]
        .into_iter()
        .collect();

        assert_eq!(collect_ranks(&threats), vec![3, 3, 1]);
        assert_eq!(calculate_overall_risk(&threats), OverallRisk::Medium);
    }

    #[test]
    fn test_overall_risk_all_low() {
        let threats: CategoryResults = vec![
            (Category::StormSurge, surge(0.1)),
            (Category::CoastalErosion, erosion("low", 0.8)),
        ]
        .into_iter()
        .collect();

        assert_eq!(calculate_overall_risk(&threats), OverallRisk::Low);
    }

    #[test]
    fn test_overall_risk_unknown_without_ranks() {
        assert_eq!(calculate_overall_risk(&CategoryResults::new()), OverallRisk::Unknown);

        let threats: CategoryResults = vec![
            (Category::BlueCarbon, PredictionResult::failed(Category::BlueCarbon, "down")),
            (Category::WeatherForecast, PredictionResult::WeatherForecast(WeatherForecast {
                predictions: vec![],
                confidence: 0.6,
            })),
        ]
        .into_iter()
        .collect();

        assert_eq!(calculate_overall_risk(&threats), OverallRisk::Unknown);
    }

    #[test]
    fn test_unrecognized_label_counts_as_medium() {
        let threats: CategoryResults = vec![(Category::CoastalErosion, erosion("extreme", 0.5))]
            .into_iter()
            .collect();

        assert_eq!(calculate_overall_risk(&threats), OverallRisk::Medium);
    }

    #[test]
    fn test_failed_results_are_ignored() {
        let threats: CategoryResults = vec![
            (Category::StormSurge, PredictionResult::failed(Category::StormSurge, "no model")),
            (Category::CoastalErosion, erosion("critical", 0.9)),
        ]
        .into_iter()
        .collect();

        assert_eq!(calculate_overall_risk(&threats), OverallRisk::Critical);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let threats: CategoryResults = vec![
            (Category::StormSurge, surge(1.2)),
            (Category::CoastalErosion, erosion("medium", 0.6)),
        ]
        .into_iter()
        .collect();

        let first = calculate_overall_risk(&threats);
        let second = calculate_overall_risk(&threats);
        assert_eq!(first, second);
        assert_eq!(categorize_surge_risk(1.2), categorize_surge_risk(1.2));
    }
}
