//! Daily weather samples

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of weather (historical, current or an aggregated forecast day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub date: NaiveDate,
    /// °C
    pub temperature: f64,
    /// Percent
    pub humidity: f64,
    pub wind_speed: f64,
    /// Free-text description, e.g. "light rain"
    pub conditions: String,
}

impl WeatherSample {
    pub fn new(date: NaiveDate, temperature: f64, humidity: f64, wind_speed: f64, conditions: &str) -> Self {
        Self {
            date,
            temperature,
            humidity,
            wind_speed,
            conditions: conditions.to_string(),
        }
    }

    /// Lower-cased conditions for keyword matching
    pub fn conditions_lower(&self) -> String {
        self.conditions.to_lowercase()
    }
}
