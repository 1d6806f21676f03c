//! Estimator capabilities
//!
//! A fitted model either yields a single value (`Point`) or a probability per
//! class (`Probabilistic`). Callers match on the variant instead of probing
//! for methods at runtime.

use std::fmt::Debug;
use std::sync::Arc;

use crate::logic::threat::Probabilities;

/// Confidence reported for a classifier that cannot give probabilities
pub const POINT_CLASSIFIER_CONFIDENCE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("expected {expected} features, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("model produced a non-finite value")]
    NonFinite,

    #[error("class index {0} has no label")]
    UnknownClass(usize),

    #[error("model has no fitted classes")]
    NoClasses,
}

pub fn check_features(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::FeatureMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Model that maps a feature vector to one value
pub trait PointEstimator: Send + Sync + Debug {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError>;
}

/// Classifier that also reports a probability per class index
pub trait ProbabilisticEstimator: PointEstimator {
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// A fitted model tagged with what it can do
#[derive(Debug, Clone)]
pub enum Estimator {
    Point(Arc<dyn PointEstimator>),
    Probabilistic(Arc<dyn ProbabilisticEstimator>),
}

/// Decoded classifier output
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
    pub probabilities: Probabilities,
}

impl Estimator {
    pub fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        let value = match self {
            Estimator::Point(model) => model.predict(features)?,
            Estimator::Probabilistic(model) => model.predict(features)?,
        };
        if !value.is_finite() {
            return Err(ModelError::NonFinite);
        }
        Ok(value)
    }

    /// Predict a class and decode it through `classes`.
    ///
    /// Probabilistic: confidence is the top probability, every class is
    /// reported. Point: fixed confidence, no probabilities.
    pub fn classify(&self, features: &[f64], classes: &[String]) -> Result<Classification, ModelError> {
        match self {
            Estimator::Probabilistic(model) => {
                let proba = model.predict_proba(features)?;
                let (best, confidence) = proba
                    .iter()
                    .copied()
                    .enumerate()
                    .fold(None, |best: Option<(usize, f64)>, (i, p)| match best {
                        Some((_, bp)) if bp >= p => best,
                        _ => Some((i, p)),
                    })
                    .ok_or(ModelError::NoClasses)?;

                let label = class_label(classes, best)?;
                let probabilities = classes
                    .iter()
                    .zip(proba.iter())
                    .map(|(name, p)| (name.clone(), *p))
                    .collect();

                Ok(Classification {
                    label,
                    confidence,
                    probabilities,
                })
            }
            Estimator::Point(_) => {
                let raw = self.predict(features)?;
                let index = raw.round().max(0.0) as usize;
                Ok(Classification {
                    label: class_label(classes, index)?,
                    confidence: POINT_CLASSIFIER_CONFIDENCE,
                    probabilities: Probabilities::new(),
                })
            }
        }
    }
}

fn class_label(classes: &[String], index: usize) -> Result<String, ModelError> {
    classes
        .get(index)
        .cloned()
        .ok_or(ModelError::UnknownClass(index))
}
