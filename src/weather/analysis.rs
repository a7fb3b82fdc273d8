//! Weather Risk Analyzer
//!
//! Classifies the forecast into one of four outlooks by keyword matching over
//! the lower-cased daily conditions, then attaches fixed risk labels and
//! preventive measures. Decision order, first match wins:
//!
//! | Outlook | Condition |
//! |---|---|
//! | HeavyRainfall | heavy-rain days > 3 |
//! | Drought | drought days > 5 |
//! | Mixed | heavy-rain days > 0 and drought days > 0 |
//! | Favorable | otherwise |
//!
//! Temperature extremes over historical + current + forecast add two extra
//! measures (heat above 35°C, cold below 10°C).

use serde::Serialize;
use tracing::debug;

use super::sample::WeatherSample;

pub const HEAVY_RAIN_KEYWORDS: [&str; 5] = ["rain", "heavy rain", "storm", "thunderstorm", "torrential"];
pub const DROUGHT_KEYWORDS: [&str; 4] = ["clear", "sunny", "hot", "dry"];

const HEAVY_RAIN_DAY_LIMIT: usize = 3;
const DROUGHT_DAY_LIMIT: usize = 5;
const HEAT_THRESHOLD_C: f64 = 35.0;
const COLD_THRESHOLD_C: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherOutlook {
    HeavyRainfall,
    Drought,
    Mixed,
    Favorable,
}

/// Fixed labels attached to an outlook
struct OutlookLabels {
    rainfall_status: &'static str,
    drought_risk: &'static str,
    crop_impact: &'static str,
    financial_risk: &'static str,
    measures: &'static [&'static str],
}

impl WeatherOutlook {
    fn labels(&self) -> OutlookLabels {
        match self {
            WeatherOutlook::HeavyRainfall => OutlookLabels {
                rainfall_status: "Heavy rainfall expected - Risk of crop damage",
                drought_risk: "",
                crop_impact: "Severe - Potential for crop damage and yield loss",
                financial_risk: "High - Risk of loan default due to crop damage",
                measures: &[
                    "Install proper drainage systems",
                    "Consider rain-resistant crop varieties",
                    "Purchase crop insurance if available",
                    "Prepare emergency funds for recovery",
                ],
            },
            WeatherOutlook::Drought => OutlookLabels {
                rainfall_status: "Drought conditions expected - Insufficient rainfall",
                drought_risk: "High - Consider irrigation systems",
                crop_impact: "Severe - Risk of crop failure",
                financial_risk: "High - Risk of loan default due to crop failure",
                measures: &[
                    "Implement efficient irrigation systems",
                    "Consider drought-resistant crop varieties",
                    "Store water in reservoirs if possible",
                    "Plan for alternative income sources",
                ],
            },
            WeatherOutlook::Mixed => OutlookLabels {
                rainfall_status: "Mixed conditions - Moderate risk",
                drought_risk: "Moderate - Monitor water availability",
                crop_impact: "Moderate - Some risk of yield reduction",
                financial_risk: "Moderate - Plan for potential yield variations",
                measures: &[
                    "Monitor weather forecasts daily",
                    "Prepare for both wet and dry conditions",
                    "Maintain flexible irrigation systems",
                    "Consider crop diversification",
                ],
            },
            WeatherOutlook::Favorable => OutlookLabels {
                rainfall_status: "Favorable conditions expected",
                drought_risk: "Low",
                crop_impact: "Minimal - Expected good yields",
                financial_risk: "Low - Expected normal loan repayment",
                measures: &[
                    "Regular crop monitoring",
                    "Maintain standard farming practices",
                    "Keep emergency funds for unexpected issues",
                ],
            },
        }
    }

    pub fn from_day_counts(heavy_rain_days: usize, drought_days: usize) -> Self {
        if heavy_rain_days > HEAVY_RAIN_DAY_LIMIT {
            WeatherOutlook::HeavyRainfall
        } else if drought_days > DROUGHT_DAY_LIMIT {
            WeatherOutlook::Drought
        } else if heavy_rain_days > 0 && drought_days > 0 {
            WeatherOutlook::Mixed
        } else {
            WeatherOutlook::Favorable
        }
    }
}

/// Temperature extremes across all samples
///
/// `average` is reported but drives no decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureSummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl TemperatureSummary {
    fn from_samples<'a>(samples: impl Iterator<Item = &'a WeatherSample>) -> Option<Self> {
        let temps: Vec<f64> = samples
            .map(|s| s.temperature)
            .filter(|t| t.is_finite())
            .collect();
        if temps.is_empty() {
            return None;
        }
        Some(Self {
            average: temps.iter().sum::<f64>() / temps.len() as f64,
            min: temps.iter().copied().fold(f64::INFINITY, f64::min),
            max: temps.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAnalysis {
    pub rainfall_status: String,
    /// Empty for the heavy-rainfall outlook
    pub drought_risk: String,
    pub crop_impact: String,
    pub financial_risk: String,
    pub preventive_measures: Vec<String>,
    pub outlook: WeatherOutlook,
    pub heavy_rain_days: usize,
    pub drought_days: usize,
    pub temperature: Option<TemperatureSummary>,
}

fn matches_any(conditions: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| conditions.contains(k))
}

/// Analyze weather risk from historical, current and daily forecast samples
pub fn analyze_weather(
    historical: &[WeatherSample],
    current: &WeatherSample,
    forecast: &[WeatherSample],
) -> WeatherAnalysis {
    let temperature = TemperatureSummary::from_samples(
        historical.iter().chain(std::iter::once(current)).chain(forecast.iter()),
    );

    let (heavy_rain_days, drought_days) =
        forecast.iter().fold((0, 0), |(heavy, dry), day| {
            let conditions = day.conditions_lower();
            (
                heavy + usize::from(matches_any(&conditions, &HEAVY_RAIN_KEYWORDS)),
                dry + usize::from(matches_any(&conditions, &DROUGHT_KEYWORDS)),
            )
        });

    let outlook = WeatherOutlook::from_day_counts(heavy_rain_days, drought_days);
    let labels = outlook.labels();

    let mut preventive_measures: Vec<String> = labels.measures.iter().map(|m| m.to_string()).collect();
    if let Some(t) = &temperature {
        if t.max > HEAT_THRESHOLD_C {
            preventive_measures.push("Consider heat-tolerant crop varieties".to_string());
        }
        if t.min < COLD_THRESHOLD_C {
            preventive_measures.push("Protect crops from cold damage".to_string());
        }
    }

    debug!(heavy_rain_days, drought_days, ?outlook, "Weather outlook");

    WeatherAnalysis {
        rainfall_status: labels.rainfall_status.to_string(),
        drought_risk: labels.drought_risk.to_string(),
        crop_impact: labels.crop_impact.to_string(),
        financial_risk: labels.financial_risk.to_string(),
        preventive_measures,
        outlook,
        heavy_rain_days,
        drought_days,
        temperature,
    }
}
