//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::logic::model::training::{DEFAULT_TRAINING_SAMPLES, DEFAULT_TRAINING_SEED};
use crate::logic::model::TrainingOptions;
use crate::logic::threat::RecommendationDetail;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding the model bundle
    pub models_path: PathBuf,

    /// Synthetic samples per model when training at startup
    pub training_samples: usize,

    /// Seed for synthetic data generation
    pub training_seed: u64,

    /// Recommendation verbosity
    pub recommendation_detail: RecommendationDetail,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 5001,
            models_path: PathBuf::from("models"),
            training_samples: DEFAULT_TRAINING_SAMPLES,
            training_seed: DEFAULT_TRAINING_SEED,
            recommendation_detail: RecommendationDetail::Detailed,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            models_path: env::var("MODELS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.models_path),

            training_samples: env::var("TRAINING_SAMPLES")
                .ok()
                .and_then(|n| n.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.training_samples),

            training_seed: env::var("TRAINING_SEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.training_seed),

            recommendation_detail: env::var("RECOMMENDATION_DETAIL")
                .ok()
                .and_then(|d| d.parse().ok())
                .unwrap_or(defaults.recommendation_detail),

            environment: env::var("ENVIRONMENT")
                .unwrap_or(defaults.environment),
        }
    }

    /// Training options for the startup bundle
    pub fn training_options(&self) -> TrainingOptions {
        TrainingOptions {
            num_samples: self.training_samples,
            seed: self.training_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5001);
        assert_eq!(config.models_path, PathBuf::from("models"));
        assert_eq!(config.training_options(), TrainingOptions::default());
        assert_eq!(config.recommendation_detail, RecommendationDetail::Detailed);
    }
}
