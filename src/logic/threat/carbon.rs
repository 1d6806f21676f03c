//! Blue Carbon Loss Estimation
//!
//! Impact of an ecosystem threat level on stored carbon.

use crate::models::EcosystemInput;

use super::results::CarbonLossEstimate;
use super::rules::{CARBON_PRICE_USD, DEFAULT_LOSS_RATE, LOSS_RATES, RECOVERY_TONS_PER_YEAR};

/// Fraction of stored carbon at risk for a threat label
pub fn loss_rate(threat_level: &str) -> f64 {
    LOSS_RATES
        .iter()
        .find(|(label, _)| *label == threat_level)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_LOSS_RATE)
}

/// Estimate potential carbon loss, its market value and recovery time
pub fn estimate_carbon_loss(threat_level: &str, ecosystem: &EcosystemInput) -> CarbonLossEstimate {
    let carbon_loss = ecosystem.carbon_storage() * loss_rate(threat_level);

    CarbonLossEstimate {
        potential_loss_tons_co2: carbon_loss,
        economic_value_usd: carbon_loss * CARBON_PRICE_USD,
        recovery_time_years: carbon_loss / RECOVERY_TONS_PER_YEAR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ecosystem(carbon_storage: Option<f64>) -> EcosystemInput {
        EcosystemInput {
            carbon_storage,
            ..Default::default()
        }
    }

    #[test]
    fn test_severe_threat_default_storage() {
        let estimate = estimate_carbon_loss("severe", &ecosystem(Some(100.0)));
        assert_relative_eq!(estimate.potential_loss_tons_co2, 60.0);
        assert_relative_eq!(estimate.economic_value_usd, 3000.0);
        assert_relative_eq!(estimate.recovery_time_years, 6.0);
    }

    #[test]
    fn test_unrecognized_label_uses_default_rate() {
        let estimate = estimate_carbon_loss("catastrophic", &ecosystem(Some(100.0)));
        assert_relative_eq!(estimate.potential_loss_tons_co2, 25.0);
        assert_relative_eq!(estimate.economic_value_usd, 1250.0);
        assert_relative_eq!(estimate.recovery_time_years, 2.5);
    }

    #[test]
    fn test_missing_storage_defaults_to_100() {
        let estimate = estimate_carbon_loss("minimal", &ecosystem(None));
        assert_relative_eq!(estimate.potential_loss_tons_co2, 5.0);
    }

    #[test]
    fn test_loss_rate_table() {
        assert_relative_eq!(loss_rate("minimal"), 0.05);
        assert_relative_eq!(loss_rate("moderate"), 0.15);
        assert_relative_eq!(loss_rate("significant"), 0.35);
        assert_relative_eq!(loss_rate("severe"), 0.60);
        assert_relative_eq!(loss_rate("unknown"), DEFAULT_LOSS_RATE);
    }

    #[test]
    fn test_estimate_is_idempotent() {
        let input = ecosystem(Some(150.0));
        assert_eq!(
            estimate_carbon_loss("significant", &input),
            estimate_carbon_loss("significant", &input)
        );
    }
}
