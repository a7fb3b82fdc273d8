//! Weather risk
//!
//! - `sample`: daily weather samples
//! - `forecast`: sub-daily readings grouped into days
//! - `analysis`: outlook classification and risk labels
//! - `quality`: 0-100 weather quality score
//! - `synthetic`: simulated history when no historical feed is available

pub mod sample;
pub mod forecast;
pub mod analysis;
pub mod quality;
pub mod synthetic;

pub use sample::WeatherSample;
pub use forecast::{group_forecast, most_frequent, ForecastReading};
pub use analysis::{analyze_weather, TemperatureSummary, WeatherAnalysis, WeatherOutlook};
pub use quality::{weather_quality_score, RiskLevel};
pub use synthetic::simulate_history;
