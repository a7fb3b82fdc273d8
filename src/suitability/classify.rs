//! Crop suitability classification

use serde::Serialize;
use tracing::debug;

use super::matcher::CropMatch;
use crate::catalog::CropCatalog;

/// Suitability bucket, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuitabilityCategory {
    NotSuitable,
    MarginallySuitable,
    ModeratelySuitable,
    HighlySuitable,
}

impl SuitabilityCategory {
    /// Thresholds 80/60/40; monotonic in the score
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            SuitabilityCategory::HighlySuitable
        } else if score >= 60.0 {
            SuitabilityCategory::ModeratelySuitable
        } else if score >= 40.0 {
            SuitabilityCategory::MarginallySuitable
        } else {
            SuitabilityCategory::NotSuitable
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            SuitabilityCategory::HighlySuitable => "Highly Suitable",
            SuitabilityCategory::ModeratelySuitable => "Moderately Suitable",
            SuitabilityCategory::MarginallySuitable => "Marginally Suitable",
            SuitabilityCategory::NotSuitable => "Not Suitable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSuitability {
    pub crop: String,
    pub name: String,
    /// Mean overall score across the depths where the crop was scored
    pub score: f64,
    pub category: SuitabilityCategory,
    pub depths_scored: usize,
}

/// Classify every crop that was scored at one or more depths, in catalog order
pub fn classify_crops(matched: &CropMatch, catalog: &CropCatalog) -> Vec<CropSuitability> {
    catalog
        .crops()
        .iter()
        .filter_map(|crop| {
            let depth_scores: Vec<f64> = matched
                .scores
                .values()
                .filter_map(|by_crop| by_crop.get(&crop.key))
                .map(|s| s.overall_score)
                .collect();
            if depth_scores.is_empty() {
                debug!(crop = %crop.key, "Crop not scored at any depth");
                return None;
            }

            let score = depth_scores.iter().sum::<f64>() / depth_scores.len() as f64;
            Some(CropSuitability {
                crop: crop.key.clone(),
                name: crop.name.clone(),
                score,
                category: SuitabilityCategory::from_score(score),
                depths_scored: depth_scores.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::crop_requirements;
    use crate::soil::{Depth, SoilMeasurements, SoilProfile, SoilProperty};
    use crate::suitability::match_crops;

    #[test]
    fn test_category_thresholds() {
        assert_eq!(SuitabilityCategory::from_score(80.0), SuitabilityCategory::HighlySuitable);
        assert_eq!(SuitabilityCategory::from_score(79.9), SuitabilityCategory::ModeratelySuitable);
        assert_eq!(SuitabilityCategory::from_score(40.0), SuitabilityCategory::MarginallySuitable);
        assert_eq!(SuitabilityCategory::from_score(39.9), SuitabilityCategory::NotSuitable);
    }

    #[test]
    fn test_category_monotonic() {
        let mut previous = SuitabilityCategory::from_score(0.0);
        for step in 0..=1000 {
            let category = SuitabilityCategory::from_score(step as f64 / 10.0);
            assert!(category >= previous);
            previous = category;
        }
    }

    #[test]
    fn test_averages_only_scored_depths() {
        let catalog = crop_requirements().unwrap();
        let wheat = catalog.get("wheat").unwrap();
        let ideal: SoilMeasurements = wheat.requirements.iter().map(|(p, r)| (*p, r.ideal)).collect();
        // Clay 45 vs wheat 20-30: linear 0
        let clay_only = SoilMeasurements::from([(SoilProperty::Clay, 45.0)]);
        let profile = SoilProfile::from([
            (Depth::Cm0To5, ideal),
            (Depth::Cm30To50, clay_only),
            (Depth::Cm50To70, SoilMeasurements::new()),
        ]);

        let matched = match_crops(&profile, &catalog);
        let classes = classify_crops(&matched, &catalog);

        let wheat_class = classes.iter().find(|c| c.crop == "wheat").unwrap();
        assert_eq!(wheat_class.depths_scored, 2);
        assert_eq!(wheat_class.score, 50.0);
        assert_eq!(wheat_class.category, SuitabilityCategory::MarginallySuitable);
        assert_eq!(
            classes.iter().map(|c| c.crop.as_str()).collect::<Vec<_>>(),
            vec!["wheat", "rice", "cotton", "sugarcane"]
        );
    }
}
