//! Forecast grouping
//!
//! Upstream forecasts arrive as sub-daily readings (typically 3-hourly). They
//! are grouped by local calendar day, in first-seen order, into one
//! `WeatherSample` per day:
//! - temperature: mean
//! - humidity: mean, rounded to an integer
//! - wind speed: mean, rounded to 0.1
//! - conditions: most frequent description

use chrono::{DateTime, FixedOffset, NaiveDate};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::sample::WeatherSample;

/// A single sub-daily forecast reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReading {
    /// Local time at the forecast location
    pub timestamp: DateTime<FixedOffset>,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub conditions: String,
}

/// Readings collected for one day (8 fit inline for 3-hourly data)
#[derive(Default)]
struct DayAccumulator<'a> {
    temperature: SmallVec<[f64; 8]>,
    humidity: SmallVec<[f64; 8]>,
    wind_speed: SmallVec<[f64; 8]>,
    conditions: SmallVec<[&'a str; 8]>,
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Most frequent value
///
/// Ties go to the tied value whose last occurrence comes latest. Arbitrary but
/// deterministic.
pub fn most_frequent<'a>(values: &[&'a str]) -> Option<&'a str> {
    // value -> (count, index of last occurrence)
    let mut counts: FxHashMap<&'a str, (usize, usize)> = FxHashMap::default();
    for (idx, &value) in values.iter().enumerate() {
        let entry = counts.entry(value).or_insert((0, idx));
        entry.0 += 1;
        entry.1 = idx;
    }

    counts
        .into_iter()
        .max_by_key(|(_, (count, last))| (*count, *last))
        .map(|(value, _)| value)
}

/// Group sub-daily readings into daily samples
pub fn group_forecast(readings: &[ForecastReading]) -> Vec<WeatherSample> {
    let mut order: Vec<NaiveDate> = Vec::new();
    let mut days: FxHashMap<NaiveDate, DayAccumulator> = FxHashMap::default();

    for reading in readings {
        let date = reading.timestamp.date_naive();
        let day = days.entry(date).or_insert_with(|| {
            order.push(date);
            DayAccumulator::default()
        });
        day.temperature.push(reading.temperature);
        day.humidity.push(reading.humidity);
        day.wind_speed.push(reading.wind_speed);
        day.conditions.push(reading.conditions.as_str());
    }

    order
        .into_iter()
        .filter_map(|date| {
            let day = days.get(&date)?;
            Some(WeatherSample {
                date,
                temperature: mean(&day.temperature),
                humidity: mean(&day.humidity).round(),
                wind_speed: (mean(&day.wind_speed) * 10.0).round() / 10.0,
                conditions: most_frequent(&day.conditions)?.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reading(ts: &str, temperature: f64, humidity: f64, wind: f64, conditions: &str) -> ForecastReading {
        ForecastReading {
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
            temperature,
            humidity,
            wind_speed: wind,
            conditions: conditions.to_string(),
        }
    }

    #[test]
    fn test_most_frequent() {
        assert_eq!(most_frequent(&["rain", "clear", "rain"]), Some("rain"));
        assert_eq!(most_frequent(&[]), None);
    }

    #[test]
    fn test_most_frequent_tie_takes_latest_last_occurrence() {
        // "clear" and "rain" both appear twice; "clear" occurs last
        assert_eq!(most_frequent(&["rain", "clear", "rain", "clear"]), Some("clear"));
        assert_eq!(most_frequent(&["clear", "rain", "clear", "rain"]), Some("rain"));
        assert_eq!(most_frequent(&["a", "b", "c"]), Some("c"));
    }

    #[test]
    fn test_groups_by_local_day_in_first_seen_order() {
        let readings = vec![
            reading("2024-06-02T09:00:00+05:30", 30.0, 60.0, 3.0, "clear sky"),
            reading("2024-06-02T12:00:00+05:30", 34.0, 55.0, 4.0, "clear sky"),
            reading("2024-06-02T15:00:00+05:30", 32.0, 58.0, 4.12, "light rain"),
            // Grouped by the reading's own offset: still the 1st
            reading("2024-06-01T23:30:00+00:00", 25.0, 80.0, 2.0, "mist"),
        ];

        let days = group_forecast(&readings);
        assert_eq!(days.len(), 2);

        let first = &days[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_relative_eq!(first.temperature, 32.0, epsilon = 0.0001);
        assert_eq!(first.humidity, 58.0); // 57.67 rounded
        assert_relative_eq!(first.wind_speed, 3.7, epsilon = 0.0001); // 3.7067
        assert_eq!(first.conditions, "clear sky");

        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(days[1].conditions, "mist");
    }
}
