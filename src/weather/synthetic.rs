//! Simulated weather history
//!
//! Stand-in for a historical weather feed: five past days derived from the
//! current sample. Yesterday is one degree cooler with the same humidity; the
//! four days before that jitter temperature by ±2°C and humidity by ±10 points.

use chrono::Duration;
use rand::Rng;

use super::sample::WeatherSample;

pub const SIMULATED_DAYS: i64 = 5;

/// Simulate the last five days before `current`, oldest first
pub fn simulate_history<R: Rng>(current: &WeatherSample, rng: &mut R) -> Vec<WeatherSample> {
    let mut history: Vec<WeatherSample> = (1..=SIMULATED_DAYS)
        .map(|days_ago| {
            let (temperature, humidity) = if days_ago == 1 {
                (current.temperature - 1.0, current.humidity)
            } else {
                (
                    current.temperature + rng.gen_range(-2.0..2.0),
                    (current.humidity + rng.gen_range(-10.0..10.0)).clamp(0.0, 100.0),
                )
            };
            WeatherSample {
                date: current.date - Duration::days(days_ago),
                temperature,
                humidity,
                wind_speed: current.wind_speed,
                conditions: current.conditions.clone(),
            }
        })
        .collect();

    history.reverse();
    history
}
