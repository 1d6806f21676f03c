//! Business logic
//!
//! - `threat`: aggregation, classification and recommendations
//! - `model`: training, persistence and model-backed prediction

pub mod threat;
pub mod model;
