//! Threat Module
//!
//! Turns per-category model outputs into an aggregated coastal threat analysis.
//! This is the CORE STEP: levels, overall risk, carbon impact, recommendations.
//!
//! ## Structure
//! - `types`: Ordinal levels and categories (RiskLevel, ThreatLevel, Category)
//! - `results`: Category payloads, failure shape, ThreatAnalysis
//! - `rules`: Thresholds, lookup tables, recommendation texts
//! - `classifier`: Surge categorization and overall risk
//! - `carbon`: Blue carbon loss estimation
//! - `recommendations`: Threshold rules → action list
//! - `analysis`: Predictor interface and orchestration
//!
//! ## Usage
//! ```ignore
//! use crate::logic::threat::{analyze, RecommendationDetail};
//!
//! let analysis = analyze(&predictor, &input, RecommendationDetail::Detailed);
//! println!("{} ({:.2})", analysis.overall_risk, analysis.confidence);
//! ```

pub mod types;
pub mod results;
pub mod rules;
pub mod classifier;
pub mod carbon;
pub mod recommendations;
pub mod analysis;

pub use types::{rank_of, Category, OverallRisk, RiskLevel, ThreatLevel};

pub use results::{
    BlueCarbonPrediction, CarbonLossEstimate, CategoryResults, ErosionPrediction, ForecastPoint,
    PredictionResult, Probabilities, SurgePrediction, ThreatAnalysis, WeatherForecast,
};

pub use rules::RecommendationDetail;

pub use classifier::{calculate_overall_risk, categorize_surge_risk};
pub use carbon::estimate_carbon_loss;
pub use recommendations::generate_recommendations;
pub use analysis::{analyze, HazardPredictor, PredictError};
