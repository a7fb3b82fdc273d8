//! Range comparison and per-property scoring curves
//!
//! A measured value is first placed relative to its ideal range (below, within,
//! above), then scored by the strategy attached to the property:
//!
//! | Strategy | Properties | Out-of-range penalty |
//! |---|---|---|
//! | `BandedPh` | ph | fixed 0.5-unit bands, then linear decay |
//! | `BandedOrganicCarbon` | organicCarbon | bands, asymmetric tail below/above |
//! | `BandedNutrient` | nitrogen, phosphorus, potassium | bands relative to the violated bound |
//! | `LinearDistance` | everything else | `100 - distance / width * 100` |
//!
//! All curves return 100 inside `[min, max]` and never leave `[0, 100]`.

use serde::{Deserialize, Serialize};

use super::property::SoilProperty;
use crate::catalog::IdealRange;

/// Position of a measured value relative to its ideal range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeFit {
    /// value < min
    BelowRange,
    /// min <= value <= max
    WithinRange,
    /// value > max
    AboveRange,
}

impl RangeFit {
    pub fn display_text(&self) -> &'static str {
        match self {
            RangeFit::BelowRange => "Below ideal range",
            RangeFit::WithinRange => "Within ideal range",
            RangeFit::AboveRange => "Above ideal range",
        }
    }
}

/// Result of comparing a value against an ideal range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeComparison {
    pub fit: RangeFit,
    pub value: f64,
    pub min: f64,
    pub ideal: f64,
    pub max: f64,
    /// Distance past the violated bound (0 when within range)
    pub distance_from_range: f64,
    /// `distance_from_range` as a fraction of the range width
    pub distance_fraction: f64,
}

impl RangeComparison {
    pub fn is_within_range(&self) -> bool {
        self.fit == RangeFit::WithinRange
    }

    /// Deviation from the ideal point as a percentage of the range width
    pub fn ideal_deviation_pct(&self) -> f64 {
        (self.value - self.ideal).abs() / (self.max - self.min) * 100.0
    }
}

/// Compare a value against a validated ideal range
pub fn compare_to_range(value: f64, range: &IdealRange) -> RangeComparison {
    let (fit, distance) = if value < range.min {
        (RangeFit::BelowRange, range.min - value)
    } else if value > range.max {
        (RangeFit::AboveRange, value - range.max)
    } else {
        (RangeFit::WithinRange, 0.0)
    };

    RangeComparison {
        fit,
        value,
        min: range.min,
        ideal: range.ideal,
        max: range.max,
        distance_from_range: distance,
        distance_fraction: distance / range.width(),
    }
}

// ============================================================================
// Scoring strategies
// ============================================================================

/// Out-of-range penalty curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    BandedPh,
    BandedOrganicCarbon,
    BandedNutrient,
    LinearDistance,
}

impl ScoringStrategy {
    /// Strategy table used by the soil quality scorer
    pub fn for_property(property: SoilProperty) -> Self {
        match property {
            SoilProperty::Ph => ScoringStrategy::BandedPh,
            SoilProperty::OrganicCarbon => ScoringStrategy::BandedOrganicCarbon,
            SoilProperty::Nitrogen | SoilProperty::Phosphorus | SoilProperty::Potassium => {
                ScoringStrategy::BandedNutrient
            }
            _ => ScoringStrategy::LinearDistance,
        }
    }

    /// Score a value against its range (0-100)
    pub fn score(&self, value: f64, range: &IdealRange) -> f64 {
        let comp = compare_to_range(value, range);
        match self {
            ScoringStrategy::BandedPh => banded_ph(&comp),
            ScoringStrategy::BandedOrganicCarbon => banded_organic_carbon(&comp),
            ScoringStrategy::BandedNutrient => banded_nutrient(&comp),
            ScoringStrategy::LinearDistance => linear_distance(&comp),
        }
    }
}

/// pH: symmetric half-unit bands, then 10 points per unit beyond 2.0
fn banded_ph(comp: &RangeComparison) -> f64 {
    if comp.is_within_range() {
        return 100.0;
    }
    let d = comp.distance_from_range;
    if d <= 0.5 {
        90.0
    } else if d <= 1.0 {
        80.0
    } else if d <= 1.5 {
        70.0
    } else if d <= 2.0 {
        60.0
    } else {
        (50.0 - (d - 2.0) * 10.0).max(0.0)
    }
}

fn banded_organic_carbon(comp: &RangeComparison) -> f64 {
    let d = comp.distance_from_range;
    match comp.fit {
        RangeFit::WithinRange => 100.0,
        RangeFit::BelowRange => {
            if d <= 0.5 {
                90.0
            } else if d <= 1.0 {
                80.0
            } else if d <= 1.5 {
                70.0
            } else {
                (60.0 - (d - 1.5) * 20.0).max(0.0)
            }
        }
        RangeFit::AboveRange => {
            if d <= 0.5 {
                90.0
            } else if d <= 1.0 {
                80.0
            } else {
                (70.0 - (d - 1.0) * 15.0).max(0.0)
            }
        }
    }
}

/// Macro-nutrients: bands at 20/40/60% of the violated bound
fn banded_nutrient(comp: &RangeComparison) -> f64 {
    let d = comp.distance_from_range;
    match comp.fit {
        RangeFit::WithinRange => 100.0,
        RangeFit::BelowRange => {
            let bound = comp.min;
            if d <= bound * 0.2 {
                90.0
            } else if d <= bound * 0.4 {
                80.0
            } else if d <= bound * 0.6 {
                70.0
            } else {
                (60.0 - (d - bound * 0.6) * 10.0).max(0.0)
            }
        }
        RangeFit::AboveRange => {
            let bound = comp.max;
            if d <= bound * 0.2 {
                90.0
            } else if d <= bound * 0.4 {
                80.0
            } else {
                (70.0 - (d - bound * 0.4) * 15.0).max(0.0)
            }
        }
    }
}

fn linear_distance(comp: &RangeComparison) -> f64 {
    if comp.is_within_range() {
        return 100.0;
    }
    (100.0 - comp.distance_fraction * 100.0).max(0.0)
}

/// Plain linear in-range/out-of-range rule, independent of the property
///
/// Used by the agricultural variant and the crop matcher.
pub fn linear_score(value: f64, range: &IdealRange) -> f64 {
    linear_distance(&compare_to_range(value, range))
}
