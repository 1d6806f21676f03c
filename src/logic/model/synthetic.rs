//! Synthetic training data
//!
//! Seeded generators that mimic the physical relations behind each hazard.
//! Same seed, same dataset.

use ndarray::{Array1, Array2};
use rand::Rng;
use rand_distr::{Beta, Distribution, Exp, Gamma, Normal, Poisson};

use crate::logic::threat::types::{RiskLevel, ThreatLevel};
use crate::models::{encode_sediment_type, SEDIMENT_TYPES};

use super::training::TrainingError;

pub const FEATURE_COUNT: usize = 5;

/// Regression samples
#[derive(Debug, Clone)]
pub struct Dataset {
    pub features: Array2<f64>,
    pub targets: Array1<f64>,
}

/// Classification samples; labels index into the class list
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    pub features: Array2<f64>,
    pub labels: Vec<usize>,
}

fn dist<D, E: std::fmt::Display>(built: Result<D, E>) -> Result<D, TrainingError> {
    built.map_err(|e| TrainingError::Distribution(e.to_string()))
}

fn matrix(rows: usize, values: Vec<f64>) -> Result<Array2<f64>, TrainingError> {
    Array2::from_shape_vec((rows, FEATURE_COUNT), values)
        .map_err(|e| TrainingError::Shape(e.to_string()))
}

// ============================================================================
// STORM SURGE
// ============================================================================

/// Surge height (m) from wind, pressure deficit and tide
pub fn surge_height(wind_speed: f64, pressure: f64, tide_height: f64) -> f64 {
    (wind_speed / 10.0).powi(2) * 0.1 + (1013.0 - pressure) * 0.01 + tide_height * 0.3
}

/// Features: wind, pressure, temperature, tide, wave
pub fn storm_surge_data<R: Rng>(rng: &mut R, n: usize) -> Result<Dataset, TrainingError> {
    let wind = dist(Gamma::new(2.0, 5.0))?;
    let pressure = dist(Normal::new(1013.0, 15.0))?;
    let temperature = dist(Normal::new(25.0, 8.0))?;
    let tide = dist(Normal::new(2.0, 0.8))?;
    let wave_noise = dist(Normal::new(0.0, 0.5))?;
    let surge_noise = dist(Normal::new(0.0, 0.2))?;

    let mut values = Vec::with_capacity(n * FEATURE_COUNT);
    let mut targets = Vec::with_capacity(n);

    for _ in 0..n {
        let w = wind.sample(rng);
        let p = pressure.sample(rng);
        let t = temperature.sample(rng);
        let h = tide.sample(rng);
        let wave = w * 0.3 + wave_noise.sample(rng);

        values.extend_from_slice(&[w, p, t, h, wave]);
        targets.push((surge_height(w, p, h) + surge_noise.sample(rng)).max(0.0));
    }

    Ok(Dataset {
        features: matrix(n, values)?,
        targets: Array1::from(targets),
    })
}

// ============================================================================
// COASTAL EROSION
// ============================================================================

/// Erosion score → class index into `RiskLevel::ALL`
pub fn erosion_class(wave_energy: f64, vegetation: f64, slope: f64, storms: f64) -> usize {
    let score = wave_energy / 10.0 + (100.0 - vegetation) / 100.0 + slope / 30.0 + storms / 5.0;
    let level = if score < 1.0 {
        RiskLevel::Low
    } else if score < 2.0 {
        RiskLevel::Medium
    } else if score < 3.0 {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    };
    usize::from(level.rank() - 1)
}

/// Features: wave energy, sediment code, vegetation, slope, storms
pub fn coastal_erosion_data<R: Rng>(rng: &mut R, n: usize) -> Result<LabeledDataset, TrainingError> {
    let wave_energy = dist(Exp::new(1.0 / 5.0))?;
    let vegetation = dist(Beta::new(2.0, 2.0))?;
    let slope = dist(Gamma::new(2.0, 5.0))?;
    let storms = dist(Poisson::new(3.0))?;

    let mut values = Vec::with_capacity(n * FEATURE_COUNT);
    let mut labels = Vec::with_capacity(n);

    for _ in 0..n {
        let we: f64 = wave_energy.sample(rng);
        let sediment = SEDIMENT_TYPES[rng.gen_range(0..SEDIMENT_TYPES.len())];
        let veg: f64 = vegetation.sample(rng) * 100.0;
        let sl: f64 = slope.sample(rng);
        let st: f64 = storms.sample(rng);

        values.extend_from_slice(&[we, encode_sediment_type(sediment), veg, sl, st]);
        labels.push(erosion_class(we, veg, sl, st));
    }

    Ok(LabeledDataset {
        features: matrix(n, values)?,
        labels,
    })
}

// ============================================================================
// BLUE CARBON
// ============================================================================

/// Ecosystem threat score → class index into `ThreatLevel::ALL`
pub fn blue_carbon_class(
    water_quality: f64,
    pollution: f64,
    human_activity: f64,
    climate: f64,
    biodiversity: f64,
) -> usize {
    let score = (100.0 - water_quality) / 100.0
        + pollution / 5.0
        + human_activity / 10.0
        + climate.abs()
        + (100.0 - biodiversity) / 100.0;
    let level = if score < 1.5 {
        ThreatLevel::Minimal
    } else if score < 2.5 {
        ThreatLevel::Moderate
    } else if score < 3.5 {
        ThreatLevel::Significant
    } else {
        ThreatLevel::Severe
    };
    usize::from(level.rank() - 1)
}

/// Features: water quality, pollution, human activity, climate, biodiversity
pub fn blue_carbon_data<R: Rng>(rng: &mut R, n: usize) -> Result<LabeledDataset, TrainingError> {
    let water_quality = dist(Beta::new(3.0, 2.0))?;
    let pollution = dist(Exp::new(1.0 / 2.0))?;
    let human = dist(Gamma::new(2.0, 3.0))?;
    let climate = dist(Normal::new(0.0, 1.0))?;
    let biodiversity = dist(Beta::new(2.0, 1.0))?;

    let mut values = Vec::with_capacity(n * FEATURE_COUNT);
    let mut labels = Vec::with_capacity(n);

    for _ in 0..n {
        let wq: f64 = water_quality.sample(rng) * 100.0;
        let po: f64 = pollution.sample(rng);
        let hu: f64 = human.sample(rng);
        let cl: f64 = climate.sample(rng);
        let bio: f64 = biodiversity.sample(rng) * 100.0;

        values.extend_from_slice(&[wq, po, hu, cl, bio]);
        labels.push(blue_carbon_class(wq, po, hu, cl, bio));
    }

    Ok(LabeledDataset {
        features: matrix(n, values)?,
        labels,
    })
}
