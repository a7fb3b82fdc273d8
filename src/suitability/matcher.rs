//! Crop Suitability Matcher
//!
//! Two passes over the soil profile:
//! 1. Every depth × crop: linear in-range score per required property (weight
//!    10 each), averaged into the pair's overall score.
//! 2. Root-zone depths only (5-15cm, 15-30cm): deviation of each value from the
//!    crop ideal as a percentage of range width, accumulated into one running
//!    average, plus recommendations for values outside `[0.8 × min, 1.2 × max]`.

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::advice::detailed_advice;
use crate::catalog::{CropCatalog, CropProfile};
use crate::soil::{
    compare_to_range, linear_score, Depth, PropertyScore, RangeFit, SoilMeasurements, SoilProfile,
    SoilProperty,
};

/// Fixed weight of every crop requirement
pub const CROP_PROPERTY_WEIGHT: f64 = 10.0;

/// Guard band factors applied to a requirement's min and max
const GUARD_LOW: f64 = 0.8;
const GUARD_HIGH: f64 = 1.2;

/// Score of one crop at one depth
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropDepthScore {
    pub overall_score: f64,
    pub property_scores: BTreeMap<SoilProperty, PropertyScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropMatch {
    /// depth → crop key → score. Pairs with no measured requirement are absent.
    pub scores: BTreeMap<Depth, BTreeMap<String, CropDepthScore>>,
    /// Terse and detailed lines interleaved, first occurrence kept
    pub recommendations: Vec<String>,
    /// `max(0, 100 - mean deviation %)`; `None` without root-zone data
    pub deviation_score: Option<f64>,
}

/// Ordered set of recommendation strings
#[derive(Default)]
struct Recommendations {
    seen: FxHashSet<String>,
    ordered: Vec<String>,
}

impl Recommendations {
    fn push(&mut self, text: String) {
        if self.seen.insert(text.clone()) {
            self.ordered.push(text);
        }
    }
}

fn score_crop_at_depth(values: &SoilMeasurements, crop: &CropProfile) -> Option<CropDepthScore> {
    let mut property_scores = BTreeMap::new();
    let mut total_weighted = 0.0;

    for (property, req) in &crop.requirements {
        let Some(&value) = values.get(property).filter(|v| v.is_finite()) else {
            continue;
        };
        let score = linear_score(value, req);
        let weighted_score = score * CROP_PROPERTY_WEIGHT / 100.0;
        total_weighted += weighted_score;

        property_scores.insert(
            *property,
            PropertyScore {
                value,
                score,
                weight: CROP_PROPERTY_WEIGHT,
                weighted_score,
                fit: compare_to_range(value, req).fit,
                interpretation: None,
            },
        );
    }

    if property_scores.is_empty() {
        return None;
    }

    let total_weight = CROP_PROPERTY_WEIGHT * property_scores.len() as f64;
    Some(CropDepthScore {
        overall_score: total_weighted / total_weight * 100.0,
        property_scores,
    })
}

/// Match a soil profile against every crop in the catalog
pub fn match_crops(profile: &SoilProfile, catalog: &CropCatalog) -> CropMatch {
    let mut scores = BTreeMap::new();
    let mut recommendations = Recommendations::default();
    let mut total_deviation = 0.0;
    let mut deviation_samples = 0usize;

    for (depth, values) in profile {
        for (property, value) in values.iter().filter(|(_, v)| !v.is_finite()) {
            warn!(property = %property, value = *value, depth = depth.label(), "Skipping non-finite soil measurement");
        }

        if depth.is_root_zone() {
            for crop in catalog.crops() {
                for (property, req) in &crop.requirements {
                    let Some(&value) = values.get(property).filter(|v| v.is_finite()) else {
                        continue;
                    };

                    total_deviation += compare_to_range(value, req).ideal_deviation_pct();
                    deviation_samples += 1;

                    if value < req.min * GUARD_LOW || value > req.max * GUARD_HIGH {
                        let (verb, direction) = if value < req.min {
                            ("Increase", RangeFit::BelowRange)
                        } else {
                            ("Reduce", RangeFit::AboveRange)
                        };
                        recommendations.push(format!(
                            "{} {} (Current: {:.2}, Ideal: {:.2})",
                            verb, property, value, req.ideal
                        ));
                        if let Some(advice) = detailed_advice(*property, direction) {
                            recommendations.push(advice.to_string());
                        }
                    }
                }
            }
        }

        let depth_scores: BTreeMap<String, CropDepthScore> = catalog
            .crops()
            .iter()
            .filter_map(|crop| score_crop_at_depth(values, crop).map(|s| (crop.key.clone(), s)))
            .collect();
        if !depth_scores.is_empty() {
            scores.insert(*depth, depth_scores);
        }
    }

    let deviation_score = (deviation_samples > 0)
        .then(|| (100.0 - total_deviation / deviation_samples as f64).max(0.0));

    debug!(
        depths = scores.len(),
        deviation_samples,
        ?deviation_score,
        recommendations = recommendations.ordered.len(),
        "Crop matching complete"
    );

    CropMatch {
        scores,
        recommendations: recommendations.ordered,
        deviation_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::crop_requirements;
    use approx::assert_relative_eq;

    /// Measurements equal to a crop's own ideal values
    fn ideal_values_of(crop: &CropProfile) -> SoilMeasurements {
        crop.requirements.iter().map(|(p, r)| (*p, r.ideal)).collect()
    }

    #[test]
    fn test_own_ideals_score_100_at_every_depth() {
        let catalog = crop_requirements().unwrap();
        for crop in catalog.crops() {
            let profile: SoilProfile =
                Depth::ALL.iter().map(|d| (*d, ideal_values_of(crop))).collect();
            let result = match_crops(&profile, &catalog);

            for depth in Depth::ALL {
                assert_eq!(result.scores[&depth][&crop.key].overall_score, 100.0);
            }
        }
    }

    #[test]
    fn test_deviation_only_uses_root_zone() {
        let catalog = crop_requirements().unwrap();
        let wheat = catalog.get("wheat").unwrap();

        // Way off at the surface, ideal for wheat in the root zone
        let surface = SoilMeasurements::from([(SoilProperty::Ph, 1.0)]);
        let profile = SoilProfile::from([
            (Depth::Cm0To5, surface),
            (Depth::Cm5To15, ideal_values_of(wheat)),
        ]);
        let result = match_crops(&profile, &catalog);

        let deviation = result.deviation_score.unwrap();
        assert!(deviation > 0.0 && deviation < 100.0);
        // Only the surface pH is far off, but it is outside the root zone
        assert!(result
            .recommendations
            .iter()
            .all(|r| !r.contains("Current: 1.00")));
    }

    #[test]
    fn test_single_property_deviation() {
        let catalog = CropCatalog::new(vec![CropProfile {
            key: "millet".to_string(),
            name: "Millet".to_string(),
            requirements: BTreeMap::from([(
                SoilProperty::Ph,
                crate::catalog::IdealRange::new(6.0, 7.0, 6.5),
            )]),
        }])
        .unwrap();

        // |6.0 - 6.5| / 1.0 * 100 = 50 at 5-15cm, 0 at 15-30cm -> mean 25
        let profile = SoilProfile::from([
            (Depth::Cm5To15, SoilMeasurements::from([(SoilProperty::Ph, 6.0)])),
            (Depth::Cm15To30, SoilMeasurements::from([(SoilProperty::Ph, 6.5)])),
        ]);
        let result = match_crops(&profile, &catalog);
        assert_relative_eq!(result.deviation_score.unwrap(), 75.0, epsilon = 0.0001);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_guard_band_recommendations_dedup() {
        let catalog = crop_requirements().unwrap();
        // pH 4.0 is below 0.8 × min for every crop
        let values = SoilMeasurements::from([(SoilProperty::Ph, 4.0)]);
        let profile = SoilProfile::from([
            (Depth::Cm5To15, values.clone()),
            (Depth::Cm15To30, values),
        ]);
        let result = match_crops(&profile, &catalog);

        let liming: Vec<_> = result
            .recommendations
            .iter()
            .filter(|r| r.starts_with("• Add agricultural lime"))
            .collect();
        assert_eq!(liming.len(), 1);
        assert_eq!(
            result.recommendations[0],
            "Increase ph (Current: 4.00, Ideal: 6.80)"
        );
        assert!(result.recommendations[1].starts_with("• Add agricultural lime"));
        // One terse line per distinct ideal (6.8, 6.0, 7.2) plus one advice block
        assert_eq!(result.recommendations.len(), 4);
    }

    #[test]
    fn test_non_finite_measurement_skipped() {
        let catalog = crop_requirements().unwrap();
        let profile = SoilProfile::from([(
            Depth::Cm5To15,
            SoilMeasurements::from([(SoilProperty::Ph, f64::NAN), (SoilProperty::Sand, 40.0)]),
        )]);
        let result = match_crops(&profile, &catalog);

        let wheat = &result.scores[&Depth::Cm5To15]["wheat"];
        assert!(!wheat.property_scores.contains_key(&SoilProperty::Ph));
        assert_eq!(wheat.overall_score, 100.0);
        assert!(result.deviation_score.unwrap().is_finite());
    }

    #[test]
    fn test_no_root_zone_means_no_deviation() {
        let catalog = crop_requirements().unwrap();
        let profile = SoilProfile::from([(
            Depth::Cm0To5,
            SoilMeasurements::from([(SoilProperty::Ph, 6.5)]),
        )]);
        let result = match_crops(&profile, &catalog);
        assert!(result.deviation_score.is_none());
        assert_eq!(result.scores[&Depth::Cm0To5].len(), 4);
    }

    #[test]
    fn test_unmatched_pairs_omitted() {
        let catalog = crop_requirements().unwrap();
        let profile = SoilProfile::from([(
            Depth::Cm0To5,
            SoilMeasurements::from([(SoilProperty::Zinc, 1.0)]),
        )]);
        let result = match_crops(&profile, &catalog);
        assert!(result.scores.is_empty());
    }
}
