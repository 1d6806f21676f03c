//! Ridge linear regressor
//!
//! Solves (XᵀX + λI)w = Xᵀy on centered data; the intercept absorbs the means.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use super::estimator::{check_features, ModelError, PointEstimator};
use super::training::TrainingError;

/// L2 penalty applied to every weight (not the intercept)
pub const RIDGE_ALPHA: f64 = 1e-3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>) -> Result<Self, TrainingError> {
        if x.nrows() == 0 || x.nrows() != y.len() {
            return Err(TrainingError::EmptyDataset);
        }

        let x_mean = x.mean_axis(Axis(0)).ok_or(TrainingError::EmptyDataset)?;
        let y_mean = y.mean().ok_or(TrainingError::EmptyDataset)?;

        let xc = x - &x_mean;
        let yc = y - y_mean;

        let mut gram = xc.t().dot(&xc);
        for i in 0..gram.nrows() {
            gram[[i, i]] += RIDGE_ALPHA;
        }
        let rhs = xc.t().dot(&yc);

        let weights = solve(gram, rhs)?;
        let intercept = y_mean - weights.dot(&x_mean);

        Ok(Self {
            weights: weights.to_vec(),
            intercept,
        })
    }
}

impl PointEstimator for LinearRegressor {
    fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        check_features(self.weights.len(), features)?;
        Ok(self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept)
    }
}

/// Gaussian elimination with partial pivoting
fn solve(mut a: Array2<f64>, mut b: Array1<f64>) -> Result<Array1<f64>, TrainingError> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))
            .ok_or(TrainingError::SingularSystem)?;
        if a[[pivot, col]].abs() < 1e-12 {
            return Err(TrainingError::SingularSystem);
        }

        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }

        for row in (col + 1)..n {
            let factor = a[[row, col]] / a[[col, col]];
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_recovers_linear_relation() {
        // y = 2a - b + 3
        let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [2.0, 3.0], [4.0, 1.0]];
        let y = x.map_axis(Axis(1), |row| 2.0 * row[0] - row[1] + 3.0);

        let model = LinearRegressor::fit(&x, &y).unwrap();
        assert_relative_eq!(model.weights[0], 2.0, epsilon = 1e-2);
        assert_relative_eq!(model.weights[1], -1.0, epsilon = 1e-2);
        assert_relative_eq!(model.predict(&[1.0, 1.0]).unwrap(), 4.0, epsilon = 1e-2);
    }

    #[test]
    fn test_solve_small_system() {
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let b = array![3.0, 5.0];
        let x = solve(a, b).unwrap();
        assert_relative_eq!(x[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_system_is_error() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        let b = array![1.0, 2.0];
        assert!(matches!(solve(a, b), Err(TrainingError::SingularSystem)));
    }

    #[test]
    fn test_empty_dataset_is_error() {
        let x = Array2::<f64>::zeros((0, 3));
        let y = Array1::<f64>::zeros(0);
        assert!(matches!(LinearRegressor::fit(&x, &y), Err(TrainingError::EmptyDataset)));
    }
}
