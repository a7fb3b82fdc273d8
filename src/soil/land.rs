//! Land profile score
//!
//! Coarse GIS land profile (soil type, drainage, erosion, slope plus a few
//! measurements) condensed into one rounded 0-100 score. Feeds the soil
//! component of the application credit path.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilType {
    Alluvial,
    Black,
    Red,
    Laterite,
    Sandy,
    #[serde(other)]
    Other,
}

impl SoilType {
    pub fn score(&self) -> f64 {
        match self {
            SoilType::Alluvial => 100.0,
            SoilType::Black => 90.0,
            SoilType::Red => 80.0,
            SoilType::Laterite => 70.0,
            SoilType::Sandy => 60.0,
            SoilType::Other => 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Drainage {
    Good,
    Moderate,
    #[serde(other)]
    Poor,
}

impl Drainage {
    pub fn score(&self) -> f64 {
        match self {
            Drainage::Good => 100.0,
            Drainage::Moderate => 70.0,
            Drainage::Poor => 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErosionLevel {
    Low,
    Moderate,
    #[serde(other)]
    High,
}

impl ErosionLevel {
    pub fn score(&self) -> f64 {
        match self {
            ErosionLevel::Low => 100.0,
            ErosionLevel::Moderate => 60.0,
            ErosionLevel::High => 30.0,
        }
    }
}

/// GIS land profile of a farm plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandProfile {
    pub soil_type: SoilType,
    /// Percent
    pub organic_matter: f64,
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub drainage: Drainage,
    pub erosion: ErosionLevel,
    /// Degrees
    pub slope: f64,
}

/// Component scores before weighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LandScoreDetails {
    pub soil_type_score: f64,
    pub organic_matter_score: f64,
    pub ph_score: f64,
    pub nutrient_score: f64,
    pub drainage_score: f64,
    pub erosion_score: f64,
    pub slope_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LandScore {
    /// Rounded weighted score
    pub score: f64,
    pub details: LandScoreDetails,
}

const OPTIMAL_PH: f64 = 6.5;

// soil type, organic matter, pH, nutrients, drainage, erosion, slope
const WEIGHTS: [f64; 7] = [0.2, 0.15, 0.15, 0.2, 0.1, 0.1, 0.1];

pub fn score_land_profile(land: &LandProfile) -> LandScore {
    let details = LandScoreDetails {
        soil_type_score: land.soil_type.score(),
        organic_matter_score: (land.organic_matter * 10.0).min(100.0),
        // 20 points per pH unit from 6.5, floored at 0
        ph_score: (100.0 - (land.ph - OPTIMAL_PH).abs() * 20.0).max(0.0),
        nutrient_score: land.nitrogen / 100.0 * 33.0
            + land.phosphorus / 100.0 * 33.0
            + land.potassium / 100.0 * 34.0,
        drainage_score: land.drainage.score(),
        erosion_score: land.erosion.score(),
        slope_score: (100.0 - land.slope * 5.0).max(0.0),
    };

    let components = [
        details.soil_type_score,
        details.organic_matter_score,
        details.ph_score,
        details.nutrient_score,
        details.drainage_score,
        details.erosion_score,
        details.slope_score,
    ];
    let weighted: f64 = components.iter().zip(WEIGHTS.iter()).map(|(s, w)| s * w).sum();

    LandScore {
        score: weighted.round(),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn alluvial_plot() -> LandProfile {
        LandProfile {
            soil_type: SoilType::Alluvial,
            organic_matter: 2.5,
            ph: 6.3,
            nitrogen: 80.0,
            phosphorus: 75.0,
            potassium: 85.0,
            drainage: Drainage::Good,
            erosion: ErosionLevel::Low,
            slope: 2.0,
        }
    }

    #[test]
    fn test_reference_plot() {
        let result = score_land_profile(&alluvial_plot());
        assert_relative_eq!(result.details.ph_score, 96.0, epsilon = 0.0001);
        assert_relative_eq!(result.details.nutrient_score, 80.05, epsilon = 0.0001);
        assert_eq!(result.details.slope_score, 90.0);
        // 20 + 3.75 + 14.4 + 16.01 + 10 + 10 + 9 = 83.16
        assert_eq!(result.score, 83.0);
    }

    #[test]
    fn test_floors() {
        let mut plot = alluvial_plot();
        plot.ph = 14.0;
        plot.slope = 45.0;
        plot.organic_matter = 30.0;
        let result = score_land_profile(&plot);
        assert_eq!(result.details.ph_score, 0.0);
        assert_eq!(result.details.slope_score, 0.0);
        assert_eq!(result.details.organic_matter_score, 100.0);
    }

    #[test]
    fn test_unknown_categories_deserialize_to_fallback() {
        let json = r#"{"soil_type": "peat", "organic_matter": 1.0, "ph": 6.5,
            "nitrogen": 0, "phosphorus": 0, "potassium": 0,
            "drainage": "waterlogged", "erosion": "severe", "slope": 0}"#;
        let plot: LandProfile = serde_json::from_str(json).unwrap();
        assert_eq!(plot.soil_type, SoilType::Other);
        assert_eq!(plot.drainage, Drainage::Poor);
        assert_eq!(plot.erosion, ErosionLevel::High);
    }
}
