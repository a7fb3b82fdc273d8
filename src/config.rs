//! Scorer configuration
//!
//! Loaded from a JSON file. Every field is optional:
//!
//! ```json
//! {
//!   "soil_score_source": "crop_deviation",
//!   "climate_temperature_c": 27.5,
//!   "crop_catalog_path": "catalogs/crops.json",
//!   "agricultural_catalog_path": "catalogs/agricultural.json"
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the config file path
pub const CONFIG_ENV: &str = "AGROSCORE_CONFIG";

/// Which soil score feeds the credit aggregator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilScoreSource {
    /// Mean overall score of the per-depth soil quality report
    #[default]
    SoilQualityReport,
    /// Crop matcher deviation score (root zone only)
    CropDeviation,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub soil_score_source: SoilScoreSource,
    /// Overrides the current temperature when picking the climate-adjusted catalog
    pub climate_temperature_c: Option<f64>,
    pub crop_catalog_path: Option<PathBuf>,
    pub agricultural_catalog_path: Option<PathBuf>,
}

impl ScorerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scorer config: {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse scorer config: {:?}", path))
    }

    /// Load from `$AGROSCORE_CONFIG`, or defaults when it is unset
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
