//! Request input models
//!
//! Every field is optional. Non-numeric values where a number is expected
//! are treated as absent, and accessors substitute the documented default.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::logic::threat::rules::DEFAULT_CARBON_STORAGE;

/// Accept any JSON value; keep it only if it is a number
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Accept any JSON value; keep it only if it is a string
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

// ============================================================================
// WEATHER
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherInput {
    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pressure: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub tide_height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wave_height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
}

impl WeatherInput {
    pub fn wind_speed(&self) -> f64 {
        self.wind_speed.unwrap_or(10.0)
    }

    pub fn pressure(&self) -> f64 {
        self.pressure.unwrap_or(1013.0)
    }

    pub fn tide_height(&self) -> f64 {
        self.tide_height.unwrap_or(2.0)
    }

    pub fn wave_height(&self) -> f64 {
        self.wave_height.unwrap_or(1.0)
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(25.0)
    }

    /// Model feature vector: wind, pressure, temperature, tide, wave
    pub fn features(&self) -> [f64; 5] {
        [
            self.wind_speed(),
            self.pressure(),
            self.temperature(),
            self.tide_height(),
            self.wave_height(),
        ]
    }
}

// ============================================================================
// COASTAL
// ============================================================================

/// Sediment type code shared by training and prediction.
/// sand 0, clay 1, rock 2, mixed 3; anything else is sand.
pub fn encode_sediment_type(sediment: &str) -> f64 {
    match sediment.trim().to_ascii_lowercase().as_str() {
        "clay" => 1.0,
        "rock" => 2.0,
        "mixed" => 3.0,
        _ => 0.0,
    }
}

pub const SEDIMENT_TYPES: [&str; 4] = ["sand", "clay", "rock", "mixed"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoastalInput {
    #[serde(default, deserialize_with = "lenient_number")]
    pub wave_energy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sediment_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub vegetation_cover: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub slope_angle: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub storm_frequency: Option<f64>,
}

impl CoastalInput {
    pub fn wave_energy(&self) -> f64 {
        self.wave_energy.unwrap_or(5.0)
    }

    pub fn sediment_type(&self) -> &str {
        self.sediment_type.as_deref().unwrap_or("sand")
    }

    pub fn vegetation_cover(&self) -> f64 {
        self.vegetation_cover.unwrap_or(50.0)
    }

    pub fn slope_angle(&self) -> f64 {
        self.slope_angle.unwrap_or(10.0)
    }

    pub fn storm_frequency(&self) -> f64 {
        self.storm_frequency.unwrap_or(3.0)
    }

    /// Model feature vector: wave energy, sediment code, vegetation, slope, storms
    pub fn features(&self) -> [f64; 5] {
        [
            self.wave_energy(),
            encode_sediment_type(self.sediment_type()),
            self.vegetation_cover(),
            self.slope_angle(),
            self.storm_frequency(),
        ]
    }
}

// ============================================================================
// ECOSYSTEM
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EcosystemInput {
    #[serde(default, deserialize_with = "lenient_number")]
    pub water_quality: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pollution_levels: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub human_activity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub climate_factors: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub biodiversity_index: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub carbon_storage: Option<f64>,
}

impl EcosystemInput {
    pub fn water_quality(&self) -> f64 {
        self.water_quality.unwrap_or(75.0)
    }

    pub fn pollution_levels(&self) -> f64 {
        self.pollution_levels.unwrap_or(2.0)
    }

    pub fn human_activity(&self) -> f64 {
        self.human_activity.unwrap_or(5.0)
    }

    pub fn climate_factors(&self) -> f64 {
        self.climate_factors.unwrap_or(0.0)
    }

    pub fn biodiversity_index(&self) -> f64 {
        self.biodiversity_index.unwrap_or(70.0)
    }

    /// Stored carbon in t CO2 / ha
    pub fn carbon_storage(&self) -> f64 {
        self.carbon_storage.unwrap_or(DEFAULT_CARBON_STORAGE)
    }

    /// Model feature vector; carbon storage is not a model input
    pub fn features(&self) -> [f64; 5] {
        [
            self.water_quality(),
            self.pollution_levels(),
            self.human_activity(),
            self.climate_factors(),
            self.biodiversity_index(),
        ]
    }
}

// ============================================================================
// HISTORICAL WEATHER
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherObservation {
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub pressure: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub wind_speed: Option<f64>,
}

impl WeatherObservation {
    pub fn temperature(&self) -> f64 {
        self.temperature.unwrap_or(25.0)
    }

    pub fn pressure(&self) -> f64 {
        self.pressure.unwrap_or(1013.0)
    }

    pub fn wind_speed(&self) -> f64 {
        self.wind_speed.unwrap_or(10.0)
    }
}

// ============================================================================
// REQUEST BODIES
// ============================================================================

/// Body of `/analyze/comprehensive`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreatInput {
    #[serde(default)]
    pub weather: Option<WeatherInput>,
    #[serde(default)]
    pub coastal: Option<CoastalInput>,
    #[serde(default)]
    pub ecosystem: Option<EcosystemInput>,
    #[serde(default)]
    pub historical_weather: Option<Vec<WeatherObservation>>,
}

/// Body of `/predict/weather`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub historical_data: Vec<WeatherObservation>,
}

/// Body of `/retrain`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RetrainRequest {
    #[validate(range(min = 100, max = 200_000))]
    pub num_samples: Option<usize>,
    pub seed: Option<u64>,
}
