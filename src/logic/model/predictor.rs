//! BlueGuard predictor
//!
//! Model-backed implementation of `HazardPredictor`. Immutable once built;
//! retraining produces a new predictor instead of mutating this one.

use chrono::Utc;

use crate::logic::threat::{
    categorize_surge_risk, estimate_carbon_loss, BlueCarbonPrediction, ErosionPrediction,
    HazardPredictor, PredictError, SurgePrediction, WeatherForecast,
};
use crate::models::{CoastalInput, EcosystemInput, WeatherInput, WeatherObservation};

use super::bundle::{BundleInfo, ModelKind, ModelSlot, StoredBundle};
use super::forecast::forecast_temperature;

/// Storm surge confidence: base + wind contribution, capped
const SURGE_CONFIDENCE_BASE: f64 = 0.6;
const SURGE_CONFIDENCE_WIND_SCALE: f64 = 50.0;
const SURGE_CONFIDENCE_WIND_WEIGHT: f64 = 0.3;
const SURGE_CONFIDENCE_MAX: f64 = 0.95;

pub fn surge_confidence(wind_speed: f64) -> f64 {
    (SURGE_CONFIDENCE_BASE + wind_speed / SURGE_CONFIDENCE_WIND_SCALE * SURGE_CONFIDENCE_WIND_WEIGHT)
        .min(SURGE_CONFIDENCE_MAX)
}

#[derive(Debug, Clone)]
pub struct BlueGuardPredictor {
    storm_surge: Option<ModelSlot>,
    coastal_erosion: Option<ModelSlot>,
    blue_carbon: Option<ModelSlot>,
    info: Option<BundleInfo>,
}

impl BlueGuardPredictor {
    /// Predictor without any model; every category reports unavailability
    pub fn empty() -> Self {
        Self {
            storm_surge: None,
            coastal_erosion: None,
            blue_carbon: None,
            info: None,
        }
    }

    pub fn with_slot(mut self, kind: ModelKind, slot: ModelSlot) -> Self {
        match kind {
            ModelKind::StormSurge => self.storm_surge = Some(slot),
            ModelKind::CoastalErosion => self.coastal_erosion = Some(slot),
            ModelKind::BlueCarbon => self.blue_carbon = Some(slot),
        }
        self
    }

    pub fn slot(&self, kind: ModelKind) -> Option<&ModelSlot> {
        match kind {
            ModelKind::StormSurge => self.storm_surge.as_ref(),
            ModelKind::CoastalErosion => self.coastal_erosion.as_ref(),
            ModelKind::BlueCarbon => self.blue_carbon.as_ref(),
        }
    }

    fn require(&self, kind: ModelKind) -> Result<&ModelSlot, PredictError> {
        self.slot(kind)
            .ok_or(PredictError::ModelUnavailable(kind.unavailable_message()))
    }

    /// Keys of the loaded models, in fixed order
    pub fn available_models(&self) -> Vec<&'static str> {
        ModelKind::ALL
            .iter()
            .filter(|kind| self.slot(**kind).is_some())
            .map(|kind| kind.key())
            .collect()
    }

    pub fn models_loaded(&self) -> usize {
        self.available_models().len()
    }

    pub fn info(&self) -> Option<&BundleInfo> {
        self.info.as_ref()
    }
}

impl From<StoredBundle> for BlueGuardPredictor {
    fn from(bundle: StoredBundle) -> Self {
        Self {
            storm_surge: bundle.storm_surge.map(ModelSlot::from),
            coastal_erosion: bundle.coastal_erosion.map(ModelSlot::from),
            blue_carbon: bundle.blue_carbon.map(ModelSlot::from),
            info: Some(BundleInfo {
                version: bundle.version,
                trained_at: bundle.trained_at,
            }),
        }
    }
}

impl HazardPredictor for BlueGuardPredictor {
    fn predict_storm_surge(&self, weather: &WeatherInput) -> Result<SurgePrediction, PredictError> {
        let slot = self.require(ModelKind::StormSurge)?;
        let surge_height = slot.predict(&weather.features())?.max(0.0);

        Ok(SurgePrediction {
            surge_height,
            confidence: surge_confidence(weather.wind_speed()),
            risk_level: categorize_surge_risk(surge_height),
        })
    }

    fn predict_coastal_erosion(&self, coastal: &CoastalInput) -> Result<ErosionPrediction, PredictError> {
        let slot = self.require(ModelKind::CoastalErosion)?;
        let classification = slot.classify(&coastal.features())?;

        Ok(ErosionPrediction {
            risk_level: classification.label,
            confidence: classification.confidence,
            probabilities: classification.probabilities,
        })
    }

    fn predict_blue_carbon(&self, ecosystem: &EcosystemInput) -> Result<BlueCarbonPrediction, PredictError> {
        let slot = self.require(ModelKind::BlueCarbon)?;
        let classification = slot.classify(&ecosystem.features())?;
        let carbon_loss_estimate = estimate_carbon_loss(&classification.label, ecosystem);

        Ok(BlueCarbonPrediction {
            threat_level: classification.label,
            confidence: classification.confidence,
            probabilities: classification.probabilities,
            carbon_loss_estimate,
        })
    }

    fn forecast_weather(&self, history: &[WeatherObservation]) -> Result<WeatherForecast, PredictError> {
        Ok(forecast_temperature(history, Utc::now()))
    }
}
