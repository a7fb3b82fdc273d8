//! Soil Scorer
//!
//! Scores measured properties against a catalog using the strategy table in
//! `curves`, then rolls weighted scores up into an overall score and the four
//! category buckets.
//!
//! Overall = (Σ weighted_score) / (Σ weight) × 100, where
//! weighted_score = score × weight / 100. This is the weight-averaged property
//! score, so it stays in [0, 100] whenever every property score does.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::curves::{compare_to_range, RangeFit, ScoringStrategy};
use super::depth::SoilMeasurements;
use super::interpretation;
use super::property::{SoilCategory, SoilProperty};
use crate::catalog::SoilCatalog;
use crate::error::{Result, ScoringError};

/// Score of one property against its ideal range
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyScore {
    pub value: f64,
    /// 0-100
    pub score: f64,
    pub weight: f64,
    /// `score * weight / 100`
    pub weighted_score: f64,
    pub fit: RangeFit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
}

/// Sum of weighted scores per category bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryScores {
    pub chemical: f64,
    pub physical: f64,
    pub nutrient: f64,
    pub structure: f64,
}

impl CategoryScores {
    pub fn add(&mut self, category: SoilCategory, weighted_score: f64) {
        match category {
            SoilCategory::Chemical => self.chemical += weighted_score,
            SoilCategory::Physical => self.physical += weighted_score,
            SoilCategory::Nutrient => self.nutrient += weighted_score,
            SoilCategory::Structure => self.structure += weighted_score,
        }
    }

    pub fn get(&self, category: SoilCategory) -> f64 {
        match category {
            SoilCategory::Chemical => self.chemical,
            SoilCategory::Physical => self.physical,
            SoilCategory::Nutrient => self.nutrient,
            SoilCategory::Structure => self.structure,
        }
    }
}

/// Soil Scorer result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilQualityScore {
    /// Weighted overall score (0-100)
    pub overall_score: f64,
    pub property_scores: BTreeMap<SoilProperty, PropertyScore>,
    pub category_scores: CategoryScores,
}

/// Score measured soil properties against a catalog
///
/// Only properties present in both `measured` and `catalog` are scored; the
/// rest are excluded from the weighted sum rather than counted as 0.
/// Non-finite measurements are skipped.
///
/// # Errors
/// `InsufficientData` when no property could be scored.
pub fn score_soil(measured: &SoilMeasurements, catalog: &SoilCatalog) -> Result<SoilQualityScore> {
    let mut property_scores = BTreeMap::new();
    let mut category_scores = CategoryScores::default();
    let mut total_weighted = 0.0;
    let mut total_weight = 0.0;

    for (property, range) in catalog.iter() {
        let Some(&value) = measured.get(&property) else {
            continue;
        };
        if !value.is_finite() {
            warn!(property = %property, value, "Skipping non-finite soil measurement");
            continue;
        }

        let strategy = ScoringStrategy::for_property(property);
        let score = strategy.score(value, range);
        let weight = range.weight.unwrap_or_else(|| property.default_weight());
        let weighted_score = score * weight / 100.0;

        total_weighted += weighted_score;
        total_weight += weight;
        category_scores.add(property.category(), weighted_score);

        property_scores.insert(
            property,
            PropertyScore {
                value,
                score,
                weight,
                weighted_score,
                fit: compare_to_range(value, range).fit,
                interpretation: interpretation::interpret(property, value),
            },
        );
    }

    if property_scores.is_empty() {
        return Err(ScoringError::insufficient(format!(
            "no measured property matches catalog '{}'",
            catalog.name()
        )));
    }

    let overall_score = total_weighted / total_weight * 100.0;
    debug!(
        catalog = catalog.name(),
        matched = property_scores.len(),
        overall_score,
        "Scored soil properties"
    );

    Ok(SoilQualityScore {
        overall_score,
        property_scores,
        category_scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ideal_soil_values, IdealRange};
    use approx::assert_relative_eq;

    fn temperate() -> SoilCatalog {
        ideal_soil_values(18.0).unwrap()
    }

    #[test]
    fn test_ph_banded_not_linear() {
        let measured = SoilMeasurements::from([(SoilProperty::Ph, 5.0)]);
        let result = score_soil(&measured, &temperate()).unwrap();

        let ph = &result.property_scores[&SoilProperty::Ph];
        assert_eq!(ph.score, 80.0);
        assert_eq!(ph.weight, 20.0);
        assert_relative_eq!(ph.weighted_score, 16.0, epsilon = 0.0001);
        assert_eq!(ph.fit, RangeFit::BelowRange);
        assert_eq!(ph.interpretation.as_deref(), Some("Moderately acidic - May need some liming"));
        assert_relative_eq!(result.overall_score, 80.0, epsilon = 0.0001);
    }

    #[test]
    fn test_weighted_overall_and_categories() {
        let measured = SoilMeasurements::from([
            (SoilProperty::Ph, 6.8),   // 100, weight 20
            (SoilProperty::Clay, 35.0), // 50, weight 5
        ]);
        let result = score_soil(&measured, &temperate()).unwrap();

        assert_relative_eq!(result.overall_score, 90.0, epsilon = 0.0001);
        assert_relative_eq!(result.category_scores.chemical, 20.0, epsilon = 0.0001);
        assert_relative_eq!(result.category_scores.physical, 2.5, epsilon = 0.0001);
        assert_eq!(result.category_scores.nutrient, 0.0);
        assert_eq!(result.category_scores.structure, 0.0);
    }

    #[test]
    fn test_missing_properties_are_excluded_not_zero() {
        let measured = SoilMeasurements::from([
            (SoilProperty::Ph, 6.8),
            (SoilProperty::Zinc, 2.0), // not in catalog
        ]);
        let result = score_soil(&measured, &temperate()).unwrap();
        assert_eq!(result.property_scores.len(), 1);
        assert_eq!(result.overall_score, 100.0);
    }

    #[test]
    fn test_no_match_is_insufficient_data() {
        let measured = SoilMeasurements::from([(SoilProperty::Zinc, 2.0)]);
        let err = score_soil(&measured, &temperate()).unwrap_err();
        assert!(matches!(err, ScoringError::InsufficientData(_)));

        let nan_only = SoilMeasurements::from([(SoilProperty::Ph, f64::NAN)]);
        assert!(score_soil(&nan_only, &temperate()).is_err());
    }

    #[test]
    fn test_catalog_weight_overrides_default() {
        let catalog = SoilCatalog::from_entries(
            "weighted",
            [(SoilProperty::Clay, IdealRange::new(20.0, 30.0, 25.0).with_weight(40.0))],
        )
        .unwrap();
        let measured = SoilMeasurements::from([(SoilProperty::Clay, 25.0)]);
        let result = score_soil(&measured, &catalog).unwrap();
        assert_eq!(result.property_scores[&SoilProperty::Clay].weight, 40.0);
    }

    #[test]
    fn test_overall_within_bounds_for_extreme_values() {
        let catalog = temperate();
        for value in [-1.0e6, -5.0, 0.0, 1.0e-3, 42.0, 1.0e6] {
            let measured: SoilMeasurements =
                SoilProperty::ALL.iter().map(|p| (*p, value)).collect();
            let result = score_soil(&measured, &catalog).unwrap();
            assert!((0.0..=100.0).contains(&result.overall_score));
            assert!(result
                .property_scores
                .values()
                .all(|s| (0.0..=100.0).contains(&s.score)));
        }
    }
}
