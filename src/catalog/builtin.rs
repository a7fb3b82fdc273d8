//! Built-in catalogs
//!
//! Literal tables for the generic, agricultural and per-crop catalogs. Each
//! constructor runs the catalog validation, so a typo in a table surfaces as a
//! `MalformedRange` at startup instead of a NaN at score time.

use serde::{Deserialize, Serialize};

use super::{CropCatalog, CropProfile, IdealRange, SoilCatalog};
use crate::error::Result;
use crate::soil::SoilProperty;

/// Average temperature above which the tropical ranges apply (°C)
pub const TROPICAL_THRESHOLD_C: f64 = 25.0;

/// Coarse climate grouping that selects the generic catalog variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateBand {
    /// Average temperature above 25°C: faster organic matter turnover, more acidic optimum
    Tropical,
    Temperate,
}

impl ClimateBand {
    pub fn from_temperature(avg_temp_c: f64) -> Self {
        if avg_temp_c > TROPICAL_THRESHOLD_C {
            ClimateBand::Tropical
        } else {
            ClimateBand::Temperate
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ClimateBand::Tropical => "Tropical",
            ClimateBand::Temperate => "Temperate",
        }
    }
}

/// Generic "ideal soil values" catalog adjusted to the local climate
///
/// Only pH and organic carbon move with climate; the remaining ranges are fixed.
/// Entries carry no weights, so the soil scorer applies its default weight table.
pub fn ideal_soil_values(avg_temp_c: f64) -> Result<SoilCatalog> {
    let band = ClimateBand::from_temperature(avg_temp_c);
    let (ph, organic_carbon) = match band {
        ClimateBand::Tropical => (IdealRange::new(5.5, 7.0, 6.2), IdealRange::new(1.5, 3.0, 2.0)),
        ClimateBand::Temperate => (IdealRange::new(6.0, 7.5, 6.8), IdealRange::new(2.0, 4.0, 3.0)),
    };

    SoilCatalog::from_entries(
        format!("ideal_soil_values:{}", band.display_name().to_lowercase()),
        [
            (SoilProperty::Ph, ph),
            (SoilProperty::OrganicCarbon, organic_carbon),
            (SoilProperty::Nitrogen, IdealRange::new(0.1, 0.5, 0.3)),
            (SoilProperty::Phosphorus, IdealRange::new(10.0, 30.0, 20.0)),
            (SoilProperty::Potassium, IdealRange::new(150.0, 300.0, 200.0)),
            (SoilProperty::Sand, IdealRange::new(30.0, 50.0, 40.0)),
            (SoilProperty::Silt, IdealRange::new(30.0, 40.0, 35.0)),
            (SoilProperty::Clay, IdealRange::new(20.0, 30.0, 25.0)),
            (SoilProperty::Cec, IdealRange::new(10.0, 20.0, 15.0)),
        ],
    )
}

/// Fixed agricultural soil standards with explicit weights
pub fn agricultural_standards() -> Result<SoilCatalog> {
    SoilCatalog::from_entries(
        "agricultural_standards",
        [
            (
                SoilProperty::Ph,
                IdealRange::new(6.0, 7.5, 6.8)
                    .with_weight(20.0)
                    .with_description("Optimal for nutrient availability and microbial activity"),
            ),
            (
                SoilProperty::OrganicCarbon,
                IdealRange::new(1.5, 3.5, 2.5)
                    .with_weight(15.0)
                    .with_description("Essential for soil structure and nutrient cycling"),
            ),
            (
                SoilProperty::Nitrogen,
                IdealRange::new(0.2, 0.4, 0.3)
                    .with_weight(10.0)
                    .with_description("Primary nutrient for plant growth"),
            ),
            (
                SoilProperty::Cec,
                IdealRange::new(12.0, 25.0, 18.0)
                    .with_weight(5.0)
                    .with_description("Indicates soil nutrient holding capacity"),
            ),
            (
                SoilProperty::Sand,
                IdealRange::new(35.0, 45.0, 40.0)
                    .with_weight(5.0)
                    .with_description("Affects soil drainage and aeration"),
            ),
            (
                SoilProperty::Silt,
                IdealRange::new(30.0, 40.0, 35.0)
                    .with_weight(5.0)
                    .with_description("Contributes to soil fertility"),
            ),
            (
                SoilProperty::Clay,
                IdealRange::new(20.0, 30.0, 25.0)
                    .with_weight(5.0)
                    .with_description("Improves water and nutrient retention"),
            ),
        ],
    )
}

/// Row layout shared by the crop tables:
/// (ph, organic carbon, nitrogen, phosphorus, potassium, sand, silt, clay), each (min, max, ideal)
type CropRow = [(f64, f64, f64); 8];

const CROP_PROPERTIES: [SoilProperty; 8] = [
    SoilProperty::Ph,
    SoilProperty::OrganicCarbon,
    SoilProperty::Nitrogen,
    SoilProperty::Phosphorus,
    SoilProperty::Potassium,
    SoilProperty::Sand,
    SoilProperty::Silt,
    SoilProperty::Clay,
];

const CROP_TABLE: [(&str, &str, CropRow); 4] = [
    (
        "wheat",
        "Wheat",
        [
            (6.0, 7.5, 6.8),
            (0.8, 1.5, 1.2),
            (0.15, 0.25, 0.2),
            (10.0, 20.0, 15.0),
            (150.0, 250.0, 200.0),
            (35.0, 45.0, 40.0),
            (30.0, 40.0, 35.0),
            (20.0, 30.0, 25.0),
        ],
    ),
    (
        "rice",
        "Rice",
        [
            (5.5, 6.5, 6.0),
            (1.0, 2.0, 1.5),
            (0.2, 0.3, 0.25),
            (15.0, 25.0, 20.0),
            (180.0, 280.0, 230.0),
            (20.0, 30.0, 25.0),
            (40.0, 50.0, 45.0),
            (25.0, 35.0, 30.0),
        ],
    ),
    (
        "cotton",
        "Cotton",
        [
            (6.5, 8.0, 7.2),
            (0.6, 1.2, 0.9),
            (0.1, 0.2, 0.15),
            (8.0, 15.0, 12.0),
            (120.0, 200.0, 160.0),
            (40.0, 50.0, 45.0),
            (25.0, 35.0, 30.0),
            (15.0, 25.0, 20.0),
        ],
    ),
    (
        "sugarcane",
        "Sugarcane",
        [
            (6.0, 7.5, 6.8),
            (1.2, 2.0, 1.6),
            (0.25, 0.35, 0.3),
            (20.0, 30.0, 25.0),
            (200.0, 300.0, 250.0),
            (30.0, 40.0, 35.0),
            (35.0, 45.0, 40.0),
            (20.0, 30.0, 25.0),
        ],
    ),
];

/// Per-crop soil requirements, in wheat, rice, cotton, sugarcane order
pub fn crop_requirements() -> Result<CropCatalog> {
    let crops = CROP_TABLE
        .iter()
        .map(|(key, name, row)| CropProfile {
            key: key.to_string(),
            name: name.to_string(),
            requirements: CROP_PROPERTIES
                .iter()
                .zip(row.iter())
                .map(|(property, &(min, max, ideal))| (*property, IdealRange::new(min, max, ideal)))
                .collect(),
        })
        .collect();

    CropCatalog::new(crops)
}
