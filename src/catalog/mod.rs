//! Ideal-range catalogs
//!
//! Catalogs are tagged data: a name plus one `IdealRange` per soil property.
//! Every catalog is validated once when it is built or loaded, so scoring code
//! can rely on `min < max` and `min <= ideal <= max` without re-checking.
//!
//! ## Catalogs
//! - `builtin::ideal_soil_values` - generic catalog, climate-adjusted
//! - `builtin::agricultural_standards` - fixed agricultural soil standards
//! - `builtin::crop_requirements` - per-crop catalogs (wheat, rice, cotton, sugarcane)
//!
//! The three families are independent and not guaranteed consistent with one another.

pub mod builtin;

pub use builtin::{agricultural_standards, crop_requirements, ideal_soil_values, ClimateBand};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ScoringError;
use crate::soil::SoilProperty;

/// Acceptable range for one soil property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
    pub ideal: f64,
    /// Scoring weight; scorers fall back to their own defaults when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl IdealRange {
    pub fn new(min: f64, max: f64, ideal: f64) -> Self {
        Self {
            min,
            max,
            ideal,
            weight: None,
            description: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Width of the acceptable range (`max - min`), positive once validated
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check the range invariants
    pub fn validate(&self, catalog: &str, property: SoilProperty) -> std::result::Result<(), ScoringError> {
        let malformed = |reason: String| ScoringError::MalformedRange {
            catalog: catalog.to_string(),
            property: property.key().to_string(),
            reason,
        };

        if !(self.min.is_finite() && self.max.is_finite() && self.ideal.is_finite()) {
            return Err(malformed("bounds must be finite".to_string()));
        }
        if self.min >= self.max {
            return Err(malformed(format!("min {} must be below max {}", self.min, self.max)));
        }
        if self.ideal < self.min || self.ideal > self.max {
            return Err(malformed(format!(
                "ideal {} outside [{}, {}]",
                self.ideal, self.min, self.max
            )));
        }
        if let Some(weight) = self.weight {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(malformed(format!("weight {} must be positive", weight)));
            }
        }
        Ok(())
    }
}

fn validate_ranges(
    catalog: &str,
    ranges: &BTreeMap<SoilProperty, IdealRange>,
) -> std::result::Result<(), ScoringError> {
    if ranges.is_empty() {
        return Err(ScoringError::EmptyCatalog(catalog.to_string()));
    }
    for (property, range) in ranges {
        range.validate(catalog, *property)?;
    }
    Ok(())
}

// ============================================================================
// Soil catalog
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawSoilCatalog {
    name: String,
    ranges: BTreeMap<SoilProperty, IdealRange>,
}

/// Named, validated set of ideal ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSoilCatalog")]
pub struct SoilCatalog {
    name: String,
    ranges: BTreeMap<SoilProperty, IdealRange>,
}

impl TryFrom<RawSoilCatalog> for SoilCatalog {
    type Error = ScoringError;

    fn try_from(raw: RawSoilCatalog) -> std::result::Result<Self, Self::Error> {
        SoilCatalog::new(raw.name, raw.ranges)
    }
}

impl SoilCatalog {
    pub fn new(
        name: impl Into<String>,
        ranges: BTreeMap<SoilProperty, IdealRange>,
    ) -> std::result::Result<Self, ScoringError> {
        let name = name.into();
        validate_ranges(&name, &ranges)?;
        Ok(Self { name, ranges })
    }

    /// Build from `(property, range)` pairs
    pub fn from_entries(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = (SoilProperty, IdealRange)>,
    ) -> std::result::Result<Self, ScoringError> {
        Self::new(name, entries.into_iter().collect())
    }

    /// Load a catalog from a JSON file (`{"name": .., "ranges": {"ph": {..}}}`)
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read soil catalog: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse soil catalog: {:?}", path))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, property: SoilProperty) -> Option<&IdealRange> {
        self.ranges.get(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SoilProperty, &IdealRange)> {
        self.ranges.iter().map(|(p, r)| (*p, r))
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

// ============================================================================
// Crop catalog
// ============================================================================

/// Soil requirements of a single crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    /// Lookup key (e.g. "wheat")
    pub key: String,
    /// Display name (e.g. "Wheat")
    pub name: String,
    pub requirements: BTreeMap<SoilProperty, IdealRange>,
}

#[derive(Debug, Deserialize)]
struct RawCropCatalog {
    crops: Vec<CropProfile>,
}

/// Ordered collection of crop profiles
///
/// Order is significant: recommendation lists are emitted in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCropCatalog")]
pub struct CropCatalog {
    crops: Vec<CropProfile>,
}

impl TryFrom<RawCropCatalog> for CropCatalog {
    type Error = ScoringError;

    fn try_from(raw: RawCropCatalog) -> std::result::Result<Self, Self::Error> {
        CropCatalog::new(raw.crops)
    }
}

impl CropCatalog {
    pub fn new(crops: Vec<CropProfile>) -> std::result::Result<Self, ScoringError> {
        if crops.is_empty() {
            return Err(ScoringError::EmptyCatalog("crops".to_string()));
        }

        for (idx, crop) in crops.iter().enumerate() {
            let catalog_name = format!("crop:{}", crop.key);
            if crops[..idx].iter().any(|c| c.key == crop.key) {
                return Err(ScoringError::MalformedRange {
                    catalog: catalog_name,
                    property: "key".to_string(),
                    reason: "duplicate crop key".to_string(),
                });
            }
            validate_ranges(&catalog_name, &crop.requirements)?;
        }

        Ok(Self { crops })
    }

    /// Load a crop catalog from a JSON file (`{"crops": [{"key": .., "requirements": {..}}]}`)
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crop catalog: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse crop catalog: {:?}", path))
    }

    pub fn crops(&self) -> &[CropProfile] {
        &self.crops
    }

    pub fn get(&self, key: &str) -> Option<&CropProfile> {
        self.crops.iter().find(|c| c.key == key)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}
