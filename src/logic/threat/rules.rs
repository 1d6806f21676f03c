//! Threat Rules & Thresholds
//!
//! Fixed thresholds, lookup tables and recommendation texts.
//! No aggregation logic here, only constants and config.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// SURGE THRESHOLDS (meters, lower bound inclusive)
// ============================================================================

pub const SURGE_MEDIUM_MIN: f64 = 0.5;
pub const SURGE_HIGH_MIN: f64 = 1.0;
pub const SURGE_CRITICAL_MIN: f64 = 2.0;

// ============================================================================
// OVERALL RISK THRESHOLDS (mean rank, upper bound exclusive)
// ============================================================================

pub const MEAN_RANK_LOW_MAX: f64 = 1.5;
pub const MEAN_RANK_MEDIUM_MAX: f64 = 2.5;
pub const MEAN_RANK_HIGH_MAX: f64 = 3.5;

// ============================================================================
// CARBON LOSS
// ============================================================================

/// Carbon storage assumed when the ecosystem input omits it (t CO2 / ha)
pub const DEFAULT_CARBON_STORAGE: f64 = 100.0;

/// Loss rate for threat labels outside the table
pub const DEFAULT_LOSS_RATE: f64 = 0.25;

/// USD per ton of CO2
pub const CARBON_PRICE_USD: f64 = 50.0;

/// Tons of CO2 recovered per year
pub const RECOVERY_TONS_PER_YEAR: f64 = 10.0;

/// Fraction of stored carbon lost per threat level
pub const LOSS_RATES: [(&str, f64); 4] = [
    ("minimal", 0.05),
    ("moderate", 0.15),
    ("significant", 0.35),
    ("severe", 0.60),
];

// ============================================================================
// RECOMMENDATIONS
// ============================================================================

/// Surge height above which an evacuation warning is issued
pub const SURGE_WARNING_MIN: f64 = 1.0;

/// Surge height above which conditions are monitored
pub const SURGE_MONITOR_MIN: f64 = 0.5;

pub const REC_SURGE_WARNING: &str = "Issue storm surge warning - evacuate low-lying areas";
pub const REC_SURGE_RESPONSE: &str = "Deploy emergency response teams";
pub const REC_SURGE_MONITOR: &str = "Monitor coastal conditions closely";
pub const REC_EROSION_PROTECTION: &str = "Implement emergency coastal protection measures";
pub const REC_EROSION_ACCESS: &str = "Restrict beach access in high-risk areas";
pub const REC_CARBON_PROTOCOL: &str = "Activate blue carbon ecosystem protection protocols";
pub const REC_CARBON_RESPONSE: &str = "Deploy rapid response conservation team";

/// How many recommendations a triggered rule emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationDetail {
    /// Primary action only
    Concise,
    /// Primary action followed by the follow-up response
    #[default]
    Detailed,
}

impl FromStr for RecommendationDetail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concise" => Ok(RecommendationDetail::Concise),
            "detailed" => Ok(RecommendationDetail::Detailed),
            other => Err(format!("unknown recommendation detail: {}", other)),
        }
    }
}
