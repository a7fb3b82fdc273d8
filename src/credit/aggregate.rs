//! Credit Score Aggregator
//!
//! final = round(0.4 × weather + 0.6 × soil), then the tier ladder in
//! `eligibility`.

use serde::Serialize;
use tracing::debug;

use super::eligibility::{determine_loan_eligibility, LoanEligibility};
use crate::error::{Result, ScoringError};

pub const WEATHER_WEIGHT: f64 = 0.4;
pub const SOIL_WEIGHT: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditDecision {
    pub final_score: f64,
    pub eligibility: LoanEligibility,
}

fn check_score(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(ScoringError::ScoreOutOfRange { name, value })
    }
}

/// Combine weather and soil scores into the final score
///
/// # Errors
/// `ScoreOutOfRange` when either input is non-finite or outside [0, 100].
pub fn final_credit_score(weather_score: f64, soil_deviation_score: f64) -> Result<f64> {
    let weather = check_score("weather_score", weather_score)?;
    let soil = check_score("soil_deviation_score", soil_deviation_score)?;
    Ok((weather * WEATHER_WEIGHT + soil * SOIL_WEIGHT).round())
}

pub fn aggregate(weather_score: f64, soil_deviation_score: f64) -> Result<CreditDecision> {
    let final_score = final_credit_score(weather_score, soil_deviation_score)?;
    let eligibility = determine_loan_eligibility(final_score);
    debug!(weather_score, soil_deviation_score, final_score, tier = eligibility.status.as_str(), "Credit decision");

    Ok(CreditDecision {
        final_score,
        eligibility,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credit::LoanTier;

    #[test]
    fn test_worked_example() {
        let decision = aggregate(70.0, 90.0).unwrap();
        assert_eq!(decision.final_score, 82.0);
        assert_eq!(decision.eligibility.tier, LoanTier::Excellent);
        assert_eq!(decision.eligibility.max_loan_amount, 1_000_000);
    }

    #[test]
    fn test_formula_exact_over_grid() {
        for weather in (0..=100).step_by(5) {
            for soil in (0..=100).step_by(5) {
                let (w, s) = (weather as f64, soil as f64);
                let expected = (0.4 * w + 0.6 * s).round();
                assert_eq!(final_credit_score(w, s).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            aggregate(101.0, 50.0),
            Err(ScoringError::ScoreOutOfRange { name: "weather_score", .. })
        ));
        assert!(aggregate(50.0, -0.1).is_err());
        assert!(aggregate(f64::NAN, 50.0).is_err());
    }
}
