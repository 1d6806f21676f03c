//! Model bundle
//!
//! `StoredBundle` is the on-disk form; `ModelSlot` is the loaded, ready to
//! predict form with the estimator tagged by capability.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::centroid::CentroidClassifier;
use super::estimator::{Classification, Estimator, ModelError};
use super::linear::LinearRegressor;
use super::scaler::StandardScaler;

/// Bumped whenever the stored layout changes
pub const BUNDLE_FORMAT_VERSION: u32 = 1;

// ============================================================================
// MODEL KINDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    StormSurge,
    CoastalErosion,
    BlueCarbon,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [
        ModelKind::StormSurge,
        ModelKind::CoastalErosion,
        ModelKind::BlueCarbon,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ModelKind::StormSurge => "storm_surge",
            ModelKind::CoastalErosion => "coastal_erosion",
            ModelKind::BlueCarbon => "blue_carbon",
        }
    }

    /// Message reported when the model is missing from the bundle
    pub fn unavailable_message(&self) -> &'static str {
        match self {
            ModelKind::StormSurge => "Storm surge model not available",
            ModelKind::CoastalErosion => "Coastal erosion model not available",
            ModelKind::BlueCarbon => "Blue carbon model not available",
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

// ============================================================================
// STORED FORM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoredModel {
    LinearRegressor(LinearRegressor),
    NearestCentroid(CentroidClassifier),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSlot {
    pub scaler: StandardScaler,
    pub model: StoredModel,
    /// Class labels by index; empty for regressors
    #[serde(default)]
    pub classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBundle {
    pub format_version: u32,
    pub version: Uuid,
    pub trained_at: DateTime<Utc>,
    pub num_samples: usize,
    pub seed: u64,
    pub storm_surge: Option<StoredSlot>,
    pub coastal_erosion: Option<StoredSlot>,
    pub blue_carbon: Option<StoredSlot>,
}

impl StoredBundle {
    pub fn new(num_samples: usize, seed: u64) -> Self {
        Self {
            format_version: BUNDLE_FORMAT_VERSION,
            version: Uuid::new_v4(),
            trained_at: Utc::now(),
            num_samples,
            seed,
            storm_surge: None,
            coastal_erosion: None,
            blue_carbon: None,
        }
    }
}

// ============================================================================
// LOADED FORM
// ============================================================================

/// Bundle identity reported by `/health` and `/retrain`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BundleInfo {
    pub version: Uuid,
    pub trained_at: DateTime<Utc>,
}

/// Scaler + estimator + class labels for one hazard
#[derive(Debug, Clone)]
pub struct ModelSlot {
    pub scaler: StandardScaler,
    pub estimator: Estimator,
    pub classes: Vec<String>,
}

impl ModelSlot {
    pub fn new(scaler: StandardScaler, estimator: Estimator, classes: Vec<String>) -> Self {
        Self {
            scaler,
            estimator,
            classes,
        }
    }

    pub fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        let scaled = self.scaler.transform(features)?;
        self.estimator.predict(&scaled)
    }

    pub fn classify(&self, features: &[f64]) -> Result<Classification, ModelError> {
        let scaled = self.scaler.transform(features)?;
        self.estimator.classify(&scaled, &self.classes)
    }
}

impl From<StoredSlot> for ModelSlot {
    fn from(stored: StoredSlot) -> Self {
        let estimator = match stored.model {
            StoredModel::LinearRegressor(model) => Estimator::Point(Arc::new(model)),
            StoredModel::NearestCentroid(model) => Estimator::Probabilistic(Arc::new(model)),
        };
        Self::new(stored.scaler, estimator, stored.classes)
    }
}
