//! Threat Types
//!
//! Ordinal vocabularies and category keys for threat analysis.
//! No aggregation logic here, only data structures and the rank table.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ============================================================================
// RANK TABLE
// ============================================================================

/// Rank assigned to labels outside both vocabularies
pub const DEFAULT_RANK: u8 = 2;

/// Rank of an ordinal label from either vocabulary.
///
/// `low`/`minimal` = 1, `medium`/`moderate` = 2, `high`/`significant` = 3,
/// `critical`/`severe` = 4. Anything else ranks as [`DEFAULT_RANK`].
pub fn rank_of(label: &str) -> u8 {
    if let Ok(level) = label.parse::<RiskLevel>() {
        return level.rank();
    }
    if let Ok(level) = label.parse::<ThreatLevel>() {
        return level.rank();
    }
    DEFAULT_RANK
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized level: {0}")]
pub struct UnknownLevel(pub String);

// ============================================================================
// RISK LEVEL (low .. critical)
// ============================================================================

/// Risk vocabulary used by storm surge, coastal erosion and the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
            RiskLevel::Critical => 4,
        }
    }

    /// Whether this level calls for protective action
    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Critical)
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// THREAT LEVEL (minimal .. severe)
// ============================================================================

/// Threat vocabulary used by blue-carbon ecosystem assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Minimal,
    Moderate,
    Significant,
    Severe,
}

impl ThreatLevel {
    pub const ALL: [ThreatLevel; 4] = [
        ThreatLevel::Minimal,
        ThreatLevel::Moderate,
        ThreatLevel::Significant,
        ThreatLevel::Severe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::Minimal => "minimal",
            ThreatLevel::Moderate => "moderate",
            ThreatLevel::Significant => "significant",
            ThreatLevel::Severe => "severe",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            ThreatLevel::Minimal => 1,
            ThreatLevel::Moderate => 2,
            ThreatLevel::Significant => 3,
            ThreatLevel::Severe => 4,
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, ThreatLevel::Significant | ThreatLevel::Severe)
    }
}

impl FromStr for ThreatLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimal" => Ok(ThreatLevel::Minimal),
            "moderate" => Ok(ThreatLevel::Moderate),
            "significant" => Ok(ThreatLevel::Significant),
            "severe" => Ok(ThreatLevel::Severe),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

impl std::fmt::Display for ThreatLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// OVERALL RISK
// ============================================================================

/// Aggregated risk across categories; `Unknown` when nothing was rankable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallRisk {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl OverallRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallRisk::Unknown => "unknown",
            OverallRisk::Low => "low",
            OverallRisk::Medium => "medium",
            OverallRisk::High => "high",
            OverallRisk::Critical => "critical",
        }
    }
}

impl From<RiskLevel> for OverallRisk {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => OverallRisk::Low,
            RiskLevel::Medium => OverallRisk::Medium,
            RiskLevel::High => OverallRisk::High,
            RiskLevel::Critical => OverallRisk::Critical,
        }
    }
}

impl std::fmt::Display for OverallRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CATEGORY
// ============================================================================

/// Threat domain keys, in the order the analyzer fills them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    StormSurge,
    CoastalErosion,
    BlueCarbon,
    WeatherForecast,
}

impl Category {
    pub fn key(&self) -> &'static str {
        match self {
            Category::StormSurge => "storm_surge",
            Category::CoastalErosion => "coastal_erosion",
            Category::BlueCarbon => "blue_carbon",
            Category::WeatherForecast => "weather_forecast",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
