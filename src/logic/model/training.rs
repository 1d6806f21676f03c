//! Model training
//!
//! Generates synthetic data, fits one model per hazard and reports hold-out
//! metrics. 80% of each dataset is used for fitting, 20% for evaluation.

use ndarray::{s, Array1, Array2};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::logic::threat::types::{RiskLevel, ThreatLevel};

use super::bundle::{StoredBundle, StoredModel, StoredSlot};
use super::centroid::CentroidClassifier;
use super::estimator::PointEstimator;
use super::linear::LinearRegressor;
use super::scaler::StandardScaler;
use super::synthetic::{self, LabeledDataset};

pub const DEFAULT_TRAINING_SAMPLES: usize = 5000;
pub const DEFAULT_TRAINING_SEED: u64 = 42;

/// Share of samples used for fitting
const TRAIN_FRACTION: f64 = 0.8;

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("training dataset is empty")]
    EmptyDataset,

    #[error("normal equations are singular")]
    SingularSystem,

    #[error("label {0} is outside the class range")]
    LabelOutOfRange(usize),

    #[error("invalid distribution: {0}")]
    Distribution(String),

    #[error("dataset shape error: {0}")]
    Shape(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingOptions {
    pub num_samples: usize,
    pub seed: u64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            num_samples: DEFAULT_TRAINING_SAMPLES,
            seed: DEFAULT_TRAINING_SEED,
        }
    }
}

// ============================================================================
// METRICS
// ============================================================================

pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len().max(1) as f64;
    let mean = actual.iter().sum::<f64>() / n;
    let ss_res: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).powi(2)).sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    1.0 - ss_res / ss_tot
}

pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    let n = actual.len().max(1) as f64;
    let mse: f64 = actual.iter().zip(predicted).map(|(a, p)| (a - p).powi(2)).sum::<f64>() / n;
    mse.sqrt()
}

pub fn accuracy(actual: &[usize], predicted: &[usize]) -> f64 {
    if actual.is_empty() {
        return 0.0;
    }
    let hits = actual.iter().zip(predicted).filter(|(a, p)| a == p).count();
    hits as f64 / actual.len() as f64
}

// ============================================================================
// TRAINING
// ============================================================================

fn split_point(n: usize) -> usize {
    ((n as f64 * TRAIN_FRACTION).round() as usize).clamp(1, n.max(1))
}

fn split_rows(x: &Array2<f64>, at: usize) -> (Array2<f64>, Array2<f64>) {
    (x.slice(s![..at, ..]).to_owned(), x.slice(s![at.., ..]).to_owned())
}

fn train_storm_surge(rng: &mut ChaCha8Rng, n: usize) -> Result<StoredSlot, TrainingError> {
    let data = synthetic::storm_surge_data(rng, n)?;
    let at = split_point(n);

    let (x_train, x_test) = split_rows(&data.features, at);
    let y_train: Array1<f64> = data.targets.slice(s![..at]).to_owned();
    let y_test = data.targets.slice(s![at..]).to_vec();

    let scaler = StandardScaler::fit(&x_train);
    let model = LinearRegressor::fit(&scaler.transform_matrix(&x_train), &y_train)?;

    if !y_test.is_empty() {
        let predicted = scaler
            .transform_matrix(&x_test)
            .rows()
            .into_iter()
            .map(|row| model.predict(&row.to_vec()))
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|e| TrainingError::Shape(e.to_string()))?;
        tracing::info!(
            "Storm surge model - R2: {:.3}, RMSE: {:.3}",
            r2_score(&y_test, &predicted),
            rmse(&y_test, &predicted)
        );
    }

    Ok(StoredSlot {
        scaler,
        model: StoredModel::LinearRegressor(model),
        classes: Vec::new(),
    })
}

fn train_classifier(
    name: &str,
    data: LabeledDataset,
    classes: &[&str],
) -> Result<StoredSlot, TrainingError> {
    let n = data.labels.len();
    let at = split_point(n);

    let (x_train, x_test) = split_rows(&data.features, at);
    let (y_train, y_test) = data.labels.split_at(at.min(n));

    let scaler = StandardScaler::fit(&x_train);
    let model = CentroidClassifier::fit(&scaler.transform_matrix(&x_train), y_train, classes.len())?;

    if !y_test.is_empty() {
        let predicted = scaler
            .transform_matrix(&x_test)
            .rows()
            .into_iter()
            .map(|row| model.predict(&row.to_vec()).map(|p| p as usize))
            .collect::<Result<Vec<usize>, _>>()
            .map_err(|e| TrainingError::Shape(e.to_string()))?;
        tracing::info!("{} model - Accuracy: {:.3}", name, accuracy(y_test, &predicted));
    }

    Ok(StoredSlot {
        scaler,
        model: StoredModel::NearestCentroid(model),
        classes: classes.iter().map(|c| c.to_string()).collect(),
    })
}

/// Train every hazard model from one seeded generator
pub fn train_bundle(options: &TrainingOptions) -> Result<StoredBundle, TrainingError> {
    if options.num_samples == 0 {
        return Err(TrainingError::EmptyDataset);
    }

    tracing::info!(
        "Training models on {} synthetic samples (seed {})",
        options.num_samples,
        options.seed
    );

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let mut bundle = StoredBundle::new(options.num_samples, options.seed);

    bundle.storm_surge = Some(train_storm_surge(&mut rng, options.num_samples)?);

    let erosion_classes: Vec<&str> = RiskLevel::ALL.iter().map(|l| l.as_str()).collect();
    let erosion = synthetic::coastal_erosion_data(&mut rng, options.num_samples)?;
    bundle.coastal_erosion = Some(train_classifier("Coastal erosion", erosion, &erosion_classes)?);

    let carbon_classes: Vec<&str> = ThreatLevel::ALL.iter().map(|l| l.as_str()).collect();
    let carbon = synthetic::blue_carbon_data(&mut rng, options.num_samples)?;
    bundle.blue_carbon = Some(train_classifier("Blue carbon", carbon, &carbon_classes)?);

    tracing::info!("All models trained (version {})", bundle.version);
    Ok(bundle)
}
