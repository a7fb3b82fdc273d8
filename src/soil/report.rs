//! Per-depth soil quality report
//!
//! Runs the soil scorer at every depth of a profile and collects low-scoring
//! properties into increase/reduce recommendations. The average of the depth
//! scores is the default soil input of the credit aggregator.

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::curves::RangeFit;
use super::depth::{Depth, SoilProfile};
use super::property::SoilProperty;
use super::quality::{score_soil, CategoryScores, PropertyScore};
use crate::catalog::SoilCatalog;
use crate::error::{Result, ScoringError};

/// Properties scoring below this get a recommendation
pub const RECOMMENDATION_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilQualityLabel {
    VeryPoor,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SoilQualityLabel {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            SoilQualityLabel::Excellent
        } else if score >= 60.0 {
            SoilQualityLabel::Good
        } else if score >= 40.0 {
            SoilQualityLabel::Fair
        } else if score >= 20.0 {
            SoilQualityLabel::Poor
        } else {
            SoilQualityLabel::VeryPoor
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            SoilQualityLabel::Excellent => "Excellent",
            SoilQualityLabel::Good => "Good",
            SoilQualityLabel::Fair => "Fair",
            SoilQualityLabel::Poor => "Poor",
            SoilQualityLabel::VeryPoor => "Very Poor",
        }
    }
}

/// Soil scorer output for one depth
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthAnalysis {
    pub score: f64,
    pub recommendations: Vec<String>,
    pub category_scores: CategoryScores,
    pub property_scores: BTreeMap<SoilProperty, PropertyScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilQualityReport {
    pub overall_quality: SoilQualityLabel,
    /// Mean of the scored depths' overall scores
    pub average_score: f64,
    /// All depth recommendations, first occurrence kept
    pub recommendations: Vec<String>,
    pub property_analysis: BTreeMap<Depth, DepthAnalysis>,
}

/// Build the soil quality report for a profile
///
/// Depths with nothing scorable are skipped with a warning.
///
/// # Errors
/// `InsufficientData` when no depth could be scored at all.
pub fn generate_soil_report(profile: &SoilProfile, catalog: &SoilCatalog) -> Result<SoilQualityReport> {
    let mut property_analysis = BTreeMap::new();

    for (depth, measured) in profile {
        let scores = match score_soil(measured, catalog) {
            Ok(scores) => scores,
            Err(ScoringError::InsufficientData(_)) => {
                warn!(depth = %depth, "No scorable soil properties at depth, skipping");
                continue;
            }
            Err(e) => return Err(e),
        };

        let recommendations = scores
            .property_scores
            .iter()
            .filter(|(_, s)| s.score < RECOMMENDATION_THRESHOLD)
            .filter_map(|(property, s)| {
                let ideal = catalog.get(*property)?.ideal;
                let verb = match s.fit {
                    RangeFit::BelowRange => "Increase",
                    RangeFit::AboveRange => "Reduce",
                    RangeFit::WithinRange => return None,
                };
                Some(format!(
                    "{} {} levels (current: {:.2}, ideal: {:.2})",
                    verb, property, s.value, ideal
                ))
            })
            .collect();

        property_analysis.insert(
            *depth,
            DepthAnalysis {
                score: scores.overall_score,
                recommendations,
                category_scores: scores.category_scores,
                property_scores: scores.property_scores,
            },
        );
    }

    if property_analysis.is_empty() {
        return Err(ScoringError::insufficient("soil quality report: no scorable depth"));
    }

    let average_score = property_analysis.values().map(|a| a.score).sum::<f64>()
        / property_analysis.len() as f64;

    let recommendations: Vec<String> = {
        let mut seen = FxHashSet::default();
        property_analysis
            .values()
            .flat_map(|a| a.recommendations.iter())
            .filter(|rec| seen.insert(rec.as_str()))
            .cloned()
            .collect()
    };

    debug!(depths = property_analysis.len(), average_score, "Soil quality report");

    Ok(SoilQualityReport {
        overall_quality: SoilQualityLabel::from_score(average_score),
        average_score,
        recommendations,
        property_analysis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ideal_soil_values;
    use crate::soil::depth::SoilMeasurements;
    use approx::assert_relative_eq;

    fn catalog() -> SoilCatalog {
        ideal_soil_values(18.0).unwrap()
    }

    #[test]
    fn test_quality_labels() {
        assert_eq!(SoilQualityLabel::from_score(80.0), SoilQualityLabel::Excellent);
        assert_eq!(SoilQualityLabel::from_score(59.9), SoilQualityLabel::Fair);
        assert_eq!(SoilQualityLabel::from_score(19.9), SoilQualityLabel::VeryPoor);
        assert_eq!(SoilQualityLabel::VeryPoor.display_text(), "Very Poor");
    }

    #[test]
    fn test_report_averages_depths_and_dedups() {
        // clay 45 -> linear 100 - 15 / 10 * 100 = 0, below threshold at both depths
        let depth_values = SoilMeasurements::from([
            (SoilProperty::Ph, 6.8),
            (SoilProperty::Clay, 45.0),
        ]);
        let profile = SoilProfile::from([
            (Depth::Cm0To5, depth_values.clone()),
            (Depth::Cm5To15, depth_values),
            (Depth::Cm15To30, SoilMeasurements::from([(SoilProperty::Ph, 6.8)])),
        ]);

        let report = generate_soil_report(&profile, &catalog()).unwrap();

        // (80 + 80 + 100) / 3
        assert_relative_eq!(report.average_score, 260.0 / 3.0, epsilon = 0.0001);
        assert_eq!(report.overall_quality, SoilQualityLabel::Excellent);
        assert_eq!(
            report.recommendations,
            vec!["Reduce clay levels (current: 45.00, ideal: 25.00)".to_string()]
        );
        assert_eq!(report.property_analysis[&Depth::Cm0To5].recommendations.len(), 1);
        assert!(report.property_analysis[&Depth::Cm15To30].recommendations.is_empty());
    }

    #[test]
    fn test_mild_deviation_not_recommended() {
        // pH 5.0 scores 80, above the recommendation threshold
        let profile = SoilProfile::from([(
            Depth::Cm0To5,
            SoilMeasurements::from([(SoilProperty::Ph, 5.0)]),
        )]);
        let report = generate_soil_report(&profile, &catalog()).unwrap();
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_unscorable_depths_skipped() {
        let profile = SoilProfile::from([
            (Depth::Cm0To5, SoilMeasurements::from([(SoilProperty::Zinc, 1.0)])),
            (Depth::Cm5To15, SoilMeasurements::from([(SoilProperty::Ph, 3.0)])),
        ]);
        let report = generate_soil_report(&profile, &catalog()).unwrap();
        assert_eq!(report.property_analysis.len(), 1);
        assert_eq!(
            report.recommendations,
            vec!["Increase ph levels (current: 3.00, ideal: 6.80)".to_string()]
        );
    }

    #[test]
    fn test_empty_profile_is_insufficient() {
        let err = generate_soil_report(&SoilProfile::new(), &catalog()).unwrap_err();
        assert!(matches!(err, ScoringError::InsufficientData(_)));
    }
}
