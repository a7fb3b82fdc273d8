//! Loan application credit path
//!
//! Independent of the weather/soil aggregator. Blends four officer-entered
//! scores and, when a GIS land profile is supplied, the land score:
//!
//! ```text
//! weighted = land_quality × 0.2 + farm_size × 0.15 + crop × 0.15 + loan_history × 0.2
//!          [+ land_score × 0.3]
//! score    = clamp(weighted + 5 (income > 500,000) + 5 (market value > 1,000,000), 0, 100)
//! ```
//!
//! The rounded score then selects a risk band and the advice lines.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScoringError};
use crate::soil::land::{score_land_profile, LandProfile, LandScore};

const LAND_QUALITY_WEIGHT: f64 = 0.2;
const FARM_SIZE_WEIGHT: f64 = 0.15;
const CROP_WEIGHT: f64 = 0.15;
const LOAN_HISTORY_WEIGHT: f64 = 0.2;
const LAND_SCORE_WEIGHT: f64 = 0.3;

const INCOME_BONUS_THRESHOLD: f64 = 500_000.0;
const MARKET_VALUE_BONUS_THRESHOLD: f64 = 1_000_000.0;
const BONUS: f64 = 5.0;

/// Crop declared on the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropType {
    Wheat,
    Rice,
    Cotton,
    Sugarcane,
    #[serde(other)]
    Other,
}

impl CropType {
    pub fn score(&self) -> f64 {
        match self {
            CropType::Wheat => 85.0,
            CropType::Rice => 80.0,
            CropType::Cotton => 75.0,
            CropType::Sugarcane => 70.0,
            CropType::Other => 65.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmApplication {
    pub land_quality: f64,
    pub farm_size: f64,
    pub crop_type: CropType,
    pub loan_history: f64,
    /// Annual income, rupees
    pub income: f64,
    /// Farm market value, rupees
    pub market_value: f64,
    #[serde(default)]
    pub land_profile: Option<LandProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationRisk {
    Low,
    Medium,
    High,
}

impl ApplicationRisk {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ApplicationRisk::Low
        } else if score >= 60.0 {
            ApplicationRisk::Medium
        } else {
            ApplicationRisk::High
        }
    }

    /// Rupees
    pub fn max_loan_amount(&self) -> u64 {
        match self {
            ApplicationRisk::Low => 5_000_000,
            ApplicationRisk::Medium => 2_500_000,
            ApplicationRisk::High => 1_000_000,
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            ApplicationRisk::Low => "Low",
            ApplicationRisk::Medium => "Medium",
            ApplicationRisk::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationScore {
    /// Rounded, clamped to [0, 100]
    pub credit_score: f64,
    pub land_score: Option<LandScore>,
    pub risk: ApplicationRisk,
    pub max_loan_amount: u64,
    pub advice: Vec<String>,
}

fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::InvalidInput { field, value })
    }
}

fn advice_for(application: &FarmApplication) -> Vec<String> {
    let mut advice = Vec::new();
    if application.land_quality < 70.0 {
        advice.push("Consider soil improvement measures to increase land quality".to_string());
    }
    if application.loan_history < 70.0 {
        advice.push("Focus on improving loan repayment history".to_string());
    }
    if application.crop_type.score() < 80.0 {
        advice.push("Consider diversifying crop selection for better returns".to_string());
    }
    advice
}

/// Score a loan application
///
/// # Errors
/// `InvalidInput` when any numeric field is NaN or infinite.
pub fn score_application(application: &FarmApplication) -> Result<ApplicationScore> {
    let land_quality = finite("land_quality", application.land_quality)?;
    let farm_size = finite("farm_size", application.farm_size)?;
    let loan_history = finite("loan_history", application.loan_history)?;
    let income = finite("income", application.income)?;
    let market_value = finite("market_value", application.market_value)?;

    let land_score = application.land_profile.as_ref().map(score_land_profile);

    let mut score = land_quality * LAND_QUALITY_WEIGHT
        + farm_size * FARM_SIZE_WEIGHT
        + application.crop_type.score() * CROP_WEIGHT
        + loan_history * LOAN_HISTORY_WEIGHT;
    if let Some(land) = &land_score {
        score += land.score * LAND_SCORE_WEIGHT;
    }
    if income > INCOME_BONUS_THRESHOLD {
        score += BONUS;
    }
    if market_value > MARKET_VALUE_BONUS_THRESHOLD {
        score += BONUS;
    }

    let credit_score = score.clamp(0.0, 100.0).round();
    let risk = ApplicationRisk::from_score(credit_score);
    debug!(credit_score, risk = risk.display_text(), with_land = land_score.is_some(), "Application scored");

    Ok(ApplicationScore {
        credit_score,
        land_score,
        risk,
        max_loan_amount: risk.max_loan_amount(),
        advice: advice_for(application),
    })
}
