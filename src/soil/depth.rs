//! Depth bands
//!
//! Upstream soil providers report every property at 7 fixed depth bands.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::property::SoilProperty;
use crate::error::ScoringError;

/// One of the 7 fixed sampling depth bands, ordered surface to deep
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Depth {
    /// Surface layer
    #[serde(rename = "0-5cm")]
    Cm0To5,
    #[serde(rename = "5-15cm")]
    Cm5To15,
    #[serde(rename = "15-30cm")]
    Cm15To30,
    #[serde(rename = "30-50cm")]
    Cm30To50,
    #[serde(rename = "50-70cm")]
    Cm50To70,
    #[serde(rename = "70-100cm")]
    Cm70To100,
    /// Deep layer
    #[serde(rename = "100-200cm")]
    Cm100To200,
}

impl Depth {
    pub const ALL: [Depth; 7] = [
        Depth::Cm0To5,
        Depth::Cm5To15,
        Depth::Cm15To30,
        Depth::Cm30To50,
        Depth::Cm50To70,
        Depth::Cm70To100,
        Depth::Cm100To200,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Depth::Cm0To5 => "0-5cm",
            Depth::Cm5To15 => "5-15cm",
            Depth::Cm15To30 => "15-30cm",
            Depth::Cm30To50 => "30-50cm",
            Depth::Cm50To70 => "50-70cm",
            Depth::Cm70To100 => "70-100cm",
            Depth::Cm100To200 => "100-200cm",
        }
    }

    /// Root-zone bands that drive crop deviation scoring and recommendations
    pub fn is_root_zone(&self) -> bool {
        matches!(self, Depth::Cm5To15 | Depth::Cm15To30)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Depth {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        Depth::ALL
            .iter()
            .copied()
            .find(|d| d.label().eq_ignore_ascii_case(&compact))
            .ok_or_else(|| ScoringError::UnknownDepth(s.to_string()))
    }
}

/// Measured property values at one depth
pub type SoilMeasurements = BTreeMap<SoilProperty, f64>;

/// Measured property values for every sampled depth
pub type SoilProfile = BTreeMap<Depth, SoilMeasurements>;
