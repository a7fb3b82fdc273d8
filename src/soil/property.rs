//! Soil properties and category groupings
//!
//! The closed set of measured soil properties the scorers understand. Declaration
//! order is the catalog order, so `BTreeMap<SoilProperty, _>` iterates the same
//! way the built-in catalogs are written.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ScoringError;

/// A measurable soil property
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoilProperty {
    Ph,
    OrganicCarbon,
    Nitrogen,
    Phosphorus,
    Potassium,
    Sand,
    Silt,
    Clay,
    BulkDensity,
    Calcium,
    Magnesium,
    Sulfur,
    Zinc,
    Copper,
    Manganese,
    Iron,
    Aluminum,
    Cec,
    Ecec,
}

/// Category bucket used for score rollups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilCategory {
    Chemical,
    Physical,
    Nutrient,
    Structure,
}

impl SoilProperty {
    pub const ALL: [SoilProperty; 19] = [
        SoilProperty::Ph,
        SoilProperty::OrganicCarbon,
        SoilProperty::Nitrogen,
        SoilProperty::Phosphorus,
        SoilProperty::Potassium,
        SoilProperty::Sand,
        SoilProperty::Silt,
        SoilProperty::Clay,
        SoilProperty::BulkDensity,
        SoilProperty::Calcium,
        SoilProperty::Magnesium,
        SoilProperty::Sulfur,
        SoilProperty::Zinc,
        SoilProperty::Copper,
        SoilProperty::Manganese,
        SoilProperty::Iron,
        SoilProperty::Aluminum,
        SoilProperty::Cec,
        SoilProperty::Ecec,
    ];

    /// Key used in catalogs, upstream exports and recommendation text
    pub fn key(&self) -> &'static str {
        match self {
            SoilProperty::Ph => "ph",
            SoilProperty::OrganicCarbon => "organicCarbon",
            SoilProperty::Nitrogen => "nitrogen",
            SoilProperty::Phosphorus => "phosphorus",
            SoilProperty::Potassium => "potassium",
            SoilProperty::Sand => "sand",
            SoilProperty::Silt => "silt",
            SoilProperty::Clay => "clay",
            SoilProperty::BulkDensity => "bulkDensity",
            SoilProperty::Calcium => "calcium",
            SoilProperty::Magnesium => "magnesium",
            SoilProperty::Sulfur => "sulfur",
            SoilProperty::Zinc => "zinc",
            SoilProperty::Copper => "copper",
            SoilProperty::Manganese => "manganese",
            SoilProperty::Iron => "iron",
            SoilProperty::Aluminum => "aluminum",
            SoilProperty::Cec => "cec",
            SoilProperty::Ecec => "ecec",
        }
    }

    /// Friendly name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            SoilProperty::Ph => "pH",
            SoilProperty::OrganicCarbon => "Organic Carbon",
            SoilProperty::Nitrogen => "Nitrogen",
            SoilProperty::Phosphorus => "Phosphorus",
            SoilProperty::Potassium => "Potassium",
            SoilProperty::Sand => "Sand",
            SoilProperty::Silt => "Silt",
            SoilProperty::Clay => "Clay",
            SoilProperty::BulkDensity => "Bulk Density",
            SoilProperty::Calcium => "Calcium",
            SoilProperty::Magnesium => "Magnesium",
            SoilProperty::Sulfur => "Sulfur",
            SoilProperty::Zinc => "Zinc",
            SoilProperty::Copper => "Copper",
            SoilProperty::Manganese => "Manganese",
            SoilProperty::Iron => "Iron",
            SoilProperty::Aluminum => "Aluminum",
            SoilProperty::Cec => "CEC",
            SoilProperty::Ecec => "ECEC",
        }
    }

    /// Rollup bucket. Every property belongs to exactly one.
    pub fn category(&self) -> SoilCategory {
        match self {
            SoilProperty::Ph | SoilProperty::OrganicCarbon | SoilProperty::Cec | SoilProperty::Ecec => {
                SoilCategory::Chemical
            }
            SoilProperty::Sand | SoilProperty::Silt | SoilProperty::Clay | SoilProperty::BulkDensity => {
                SoilCategory::Physical
            }
            SoilProperty::Nitrogen
            | SoilProperty::Phosphorus
            | SoilProperty::Potassium
            | SoilProperty::Calcium
            | SoilProperty::Magnesium
            | SoilProperty::Sulfur => SoilCategory::Nutrient,
            SoilProperty::Zinc
            | SoilProperty::Copper
            | SoilProperty::Manganese
            | SoilProperty::Iron
            | SoilProperty::Aluminum => SoilCategory::Structure,
        }
    }

    /// Weight applied by the soil scorer when a catalog entry carries none
    pub fn default_weight(&self) -> f64 {
        match self {
            SoilProperty::Ph => 20.0,
            SoilProperty::OrganicCarbon => 15.0,
            SoilProperty::Nitrogen | SoilProperty::Phosphorus | SoilProperty::Potassium => 10.0,
            SoilProperty::Sulfur
            | SoilProperty::Zinc
            | SoilProperty::Copper
            | SoilProperty::Manganese
            | SoilProperty::Iron => 3.0,
            SoilProperty::Aluminum => 2.0,
            // sand, silt, clay, bulk density, calcium, magnesium, cec, ecec
            _ => 5.0,
        }
    }
}

impl fmt::Display for SoilProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SoilProperty {
    type Err = ScoringError;

    /// Accepts catalog keys case-insensitively, plus the snake_case spellings
    /// some soil exports use (`organic_carbon`, `bulk_density`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        SoilProperty::ALL
            .iter()
            .copied()
            .find(|p| p.key().to_lowercase() == normalized)
            .ok_or_else(|| ScoringError::UnknownProperty(s.to_string()))
    }
}

impl SoilCategory {
    pub fn display_text(&self) -> &'static str {
        match self {
            SoilCategory::Chemical => "Chemical Properties",
            SoilCategory::Physical => "Physical Properties",
            SoilCategory::Nutrient => "Nutrient Levels",
            SoilCategory::Structure => "Soil Structure",
        }
    }
}
