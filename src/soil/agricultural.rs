//! Agricultural Soil Score
//!
//! Second soil scoring variant: linear distance for every property, no special
//! curves, plus a qualitative grade and increase/reduce recommendations. It is
//! not expected to agree numerically with `quality::score_soil`.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::curves::{compare_to_range, linear_score, RangeFit};
use super::depth::SoilMeasurements;
use super::property::SoilProperty;
use super::quality::PropertyScore;
use crate::catalog::SoilCatalog;
use crate::error::{Result, ScoringError};

/// Agricultural soil grade (thresholds 80/60/40/20)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgriculturalGrade {
    Unsuitable,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl AgriculturalGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            AgriculturalGrade::Excellent
        } else if score >= 60.0 {
            AgriculturalGrade::Good
        } else if score >= 40.0 {
            AgriculturalGrade::Fair
        } else if score >= 20.0 {
            AgriculturalGrade::Poor
        } else {
            AgriculturalGrade::Unsuitable
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            AgriculturalGrade::Excellent => "Excellent Agricultural Soil",
            AgriculturalGrade::Good => "Good Agricultural Soil",
            AgriculturalGrade::Fair => "Fair Agricultural Soil",
            AgriculturalGrade::Poor => "Poor Agricultural Soil",
            AgriculturalGrade::Unsuitable => "Unsuitable for Agriculture",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgriculturalSoilScore {
    pub overall_score: f64,
    pub grade: AgriculturalGrade,
    /// `grade.display_text()`, kept for consumers that only render labels
    pub quality_category: String,
    pub property_scores: BTreeMap<SoilProperty, PropertyScore>,
    /// One line per out-of-range property, catalog order
    pub recommendations: Vec<String>,
}

/// Score measurements against the agricultural standards
///
/// # Errors
/// `InsufficientData` when no standard property was measured.
pub fn score_agricultural(
    measured: &SoilMeasurements,
    standards: &SoilCatalog,
) -> Result<AgriculturalSoilScore> {
    let mut property_scores = BTreeMap::new();
    let mut recommendations = Vec::new();
    let mut total_weighted = 0.0;
    let mut total_weight = 0.0;

    for (property, standard) in standards.iter() {
        let Some(&value) = measured.get(&property) else {
            continue;
        };
        if !value.is_finite() {
            warn!(property = %property, value, "Skipping non-finite soil measurement");
            continue;
        }

        let fit = compare_to_range(value, standard).fit;
        let score = linear_score(value, standard);
        let weight = standard.weight.unwrap_or_else(|| property.default_weight());
        let weighted_score = score * weight / 100.0;

        match fit {
            RangeFit::BelowRange => recommendations.push(format!(
                "Increase {} levels (Current: {:.2}, Ideal: {:.2})",
                property, value, standard.ideal
            )),
            RangeFit::AboveRange => recommendations.push(format!(
                "Reduce {} levels (Current: {:.2}, Ideal: {:.2})",
                property, value, standard.ideal
            )),
            RangeFit::WithinRange => {}
        }

        total_weighted += weighted_score;
        total_weight += weight;
        property_scores.insert(
            property,
            PropertyScore {
                value,
                score,
                weight,
                weighted_score,
                fit,
                interpretation: None,
            },
        );
    }

    if property_scores.is_empty() {
        return Err(ScoringError::insufficient(format!(
            "agricultural score against '{}'",
            standards.name()
        )));
    }

    let overall_score = total_weighted / total_weight * 100.0;
    let grade = AgriculturalGrade::from_score(overall_score);
    debug!(overall_score, grade = grade.display_text(), "Agricultural soil score");

    Ok(AgriculturalSoilScore {
        overall_score,
        grade,
        quality_category: grade.display_text().to_string(),
        property_scores,
        recommendations,
    })
}
