//! Weather trend forecast
//!
//! Mean temperature of the recent window plus a daily sine cycle.

use std::f64::consts::PI;

use chrono::{DateTime, Duration, Utc};

use crate::logic::threat::{ForecastPoint, WeatherForecast};
use crate::models::WeatherObservation;

/// Observations considered for the baseline temperature
pub const FORECAST_WINDOW: usize = 24;

/// Hours ahead, one point per hour
pub const FORECAST_HORIZON: u32 = 24;

/// Amplitude of the daily cycle (°C)
pub const DAILY_AMPLITUDE: f64 = 3.0;

pub const FORECAST_CONFIDENCE: f64 = 0.6;

/// Forecast the next 24 hours from `now`. Empty history uses one default observation.
pub fn forecast_temperature(history: &[WeatherObservation], now: DateTime<Utc>) -> WeatherForecast {
    let default_history = [WeatherObservation::default()];
    let history = if history.is_empty() {
        &default_history[..]
    } else {
        history
    };

    let window = &history[history.len().saturating_sub(FORECAST_WINDOW)..];
    let base = window.iter().map(|o| o.temperature()).sum::<f64>() / window.len() as f64;

    let predictions = (1..=FORECAST_HORIZON)
        .map(|hour| {
            let cycle = DAILY_AMPLITUDE * (2.0 * PI * f64::from(hour) / 24.0).sin();
            ForecastPoint {
                timestamp: now + Duration::hours(i64::from(hour)),
                temperature: base + cycle,
                hour_offset: hour,
            }
        })
        .collect();

    WeatherForecast {
        predictions,
        confidence: FORECAST_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn obs(temperature: f64) -> WeatherObservation {
        WeatherObservation {
            temperature: Some(temperature),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_produces_24_hourly_points() {
        let forecast = forecast_temperature(&[obs(20.0)], now());

        assert_eq!(forecast.predictions.len(), 24);
        assert_eq!(forecast.confidence, FORECAST_CONFIDENCE);
        assert_eq!(forecast.predictions[0].hour_offset, 1);
        assert_eq!(forecast.predictions[0].timestamp, now() + Duration::hours(1));
        assert_eq!(forecast.predictions[23].hour_offset, 24);
    }

    #[test]
    fn test_daily_cycle_around_mean() {
        let forecast = forecast_temperature(&[obs(18.0), obs(22.0)], now());

        // peak at hour 6, trough at hour 18, back to mean at 24
        assert_relative_eq!(forecast.predictions[5].temperature, 23.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.predictions[17].temperature, 17.0, epsilon = 1e-9);
        assert_relative_eq!(forecast.predictions[23].temperature, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_only_last_24_observations_count() {
        let mut history: Vec<WeatherObservation> = (0..10).map(|_| obs(100.0)).collect();
        history.extend((0..24).map(|_| obs(10.0)));

        let forecast = forecast_temperature(&history, now());
        assert_relative_eq!(forecast.predictions[23].temperature, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty_history_uses_default_temperature() {
        let forecast = forecast_temperature(&[], now());
        assert_relative_eq!(forecast.predictions[11].temperature, 25.0, epsilon = 1e-9);
    }
}
