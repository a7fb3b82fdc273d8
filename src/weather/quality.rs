//! Weather quality score
//!
//! Starts at 100 and applies three independent deduction groups read from the
//! analysis labels. Groups stack, so the drought outlook loses 35 + 25 + 30.

use serde::Serialize;

use super::analysis::WeatherAnalysis;

/// Leading risk word of a label such as "High - Risk of loan default"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_label(label: &str) -> Option<Self> {
        let lead = label.split(" - ").next().unwrap_or(label).trim();
        match lead {
            "Low" => Some(RiskLevel::Low),
            "Moderate" => Some(RiskLevel::Moderate),
            "High" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

fn rainfall_deduction(status: &str) -> f64 {
    if status.contains("Heavy rainfall") {
        30.0
    } else if status.contains("Drought") {
        35.0
    } else if status.contains("Mixed conditions") {
        15.0
    } else {
        0.0
    }
}

fn financial_deduction(risk: &str) -> f64 {
    match RiskLevel::from_label(risk) {
        Some(RiskLevel::High) => 25.0,
        Some(RiskLevel::Moderate) => 15.0,
        _ => 0.0,
    }
}

fn crop_impact_deduction(impact: &str) -> f64 {
    if impact.contains("Severe") {
        30.0
    } else if impact.contains("Moderate") {
        15.0
    } else {
        0.0
    }
}

/// 0-100 weather quality score
pub fn weather_quality_score(analysis: &WeatherAnalysis) -> f64 {
    let score = 100.0
        - rainfall_deduction(&analysis.rainfall_status)
        - financial_deduction(&analysis.financial_risk)
        - crop_impact_deduction(&analysis.crop_impact);
    score.clamp(0.0, 100.0)
}
