//! Nearest-centroid classifier
//!
//! One centroid per class; probabilities are a softmax over negative squared
//! distances. Classes never seen during fitting get probability 0.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use super::estimator::{check_features, ModelError, PointEstimator, ProbabilisticEstimator};
use super::training::TrainingError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidClassifier {
    pub n_features: usize,
    /// Indexed by class; `None` for classes absent from the training data
    pub centroids: Vec<Option<Vec<f64>>>,
}

impl CentroidClassifier {
    pub fn fit(x: &Array2<f64>, labels: &[usize], n_classes: usize) -> Result<Self, TrainingError> {
        if x.nrows() == 0 || x.nrows() != labels.len() {
            return Err(TrainingError::EmptyDataset);
        }

        let n_features = x.ncols();
        let mut sums = vec![vec![0.0; n_features]; n_classes];
        let mut counts = vec![0usize; n_classes];

        for (row, &label) in x.axis_iter(Axis(0)).zip(labels) {
            if label >= n_classes {
                return Err(TrainingError::LabelOutOfRange(label));
            }
            counts[label] += 1;
            for (sum, v) in sums[label].iter_mut().zip(row.iter()) {
                *sum += v;
            }
        }

        let centroids = sums
            .into_iter()
            .zip(counts)
            .map(|(sum, count)| {
                (count > 0).then(|| sum.into_iter().map(|s| s / count as f64).collect())
            })
            .collect();

        Ok(Self {
            n_features,
            centroids,
        })
    }
}

impl PointEstimator for CentroidClassifier {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        let proba = self.predict_proba(features)?;
        let best = proba
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .ok_or(ModelError::NoClasses)?;
        Ok(best as f64)
    }
}

impl ProbabilisticEstimator for CentroidClassifier {
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_features(self.n_features, features)?;

        let scores: Vec<Option<f64>> = self
            .centroids
            .iter()
            .map(|centroid| {
                centroid.as_ref().map(|c| {
                    -c.iter()
                        .zip(features)
                        .map(|(a, b)| (a - b).powi(2))
                        .sum::<f64>()
                })
            })
            .collect();

        let max = scores
            .iter()
            .flatten()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Err(ModelError::NoClasses);
        }

        let exp: Vec<f64> = scores
            .iter()
            .map(|s| s.map_or(0.0, |s| (s - max).exp()))
            .collect();
        let total: f64 = exp.iter().sum();

        Ok(exp.into_iter().map(|e| e / total).collect())
    }
}
