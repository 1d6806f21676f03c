//! Standard scaler: zero mean, unit variance per feature

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use super::estimator::{check_features, ModelError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl StandardScaler {
    /// Fit on the columns of `x`. Constant columns get std 1.
    pub fn fit(x: &Array2<f64>) -> Self {
        let n = x.nrows().max(1) as f64;
        let mean: Vec<f64> = x.sum_axis(Axis(0)).iter().map(|s| s / n).collect();

        let std = x
            .axis_iter(Axis(1))
            .zip(mean.iter())
            .map(|(column, m)| {
                let var = column.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n;
                let std = var.sqrt();
                if std > f64::EPSILON { std } else { 1.0 }
            })
            .collect();

        Self { mean, std }
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_features(self.n_features(), features)?;
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }

    pub fn transform_matrix(&self, x: &Array2<f64>) -> Array2<f64> {
        let mut out = x.clone();
        for (mut column, (m, s)) in out
            .axis_iter_mut(Axis(1))
            .zip(self.mean.iter().zip(self.std.iter()))
        {
            column.mapv_inplace(|v| (v - m) / s);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_fit_and_transform() {
        let x = array![[1.0, 10.0], [3.0, 10.0]];
        let scaler = StandardScaler::fit(&x);

        assert_eq!(scaler.mean, vec![2.0, 10.0]);
        assert_eq!(scaler.std, vec![1.0, 1.0]);

        let scaled = scaler.transform(&[3.0, 12.0]).unwrap();
        assert_relative_eq!(scaled[0], 1.0);
        assert_relative_eq!(scaled[1], 2.0);
    }

    #[test]
    fn test_matrix_transform_centers_columns() {
        let x = array![[1.0, 2.0], [2.0, 4.0], [3.0, 6.0]];
        let scaler = StandardScaler::fit(&x);
        let scaled = scaler.transform_matrix(&x);

        for column in scaled.axis_iter(Axis(1)) {
            assert_relative_eq!(column.sum(), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        let scaler = StandardScaler::fit(&array![[1.0, 2.0]]);
        assert!(scaler.transform(&[1.0]).is_err());
    }
}
