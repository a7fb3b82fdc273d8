//! Soil scoring
//!
//! Two independent scorers share the property/depth model:
//! - `quality::score_soil` uses the per-property penalty curves
//! - `agricultural::score_agricultural` applies the plain linear rule and a label
//!
//! `report` runs the soil scorer over every depth of a profile, and `land`
//! scores the coarse GIS land profile used by loan applications.

pub mod property;
pub mod depth;
pub mod curves;
pub mod interpretation;
pub mod quality;
pub mod agricultural;
pub mod report;
pub mod land;

pub use property::{SoilCategory, SoilProperty};
pub use depth::{Depth, SoilMeasurements, SoilProfile};
pub use curves::{compare_to_range, linear_score, RangeComparison, RangeFit, ScoringStrategy};
pub use quality::{score_soil, CategoryScores, PropertyScore, SoilQualityScore};
pub use agricultural::{score_agricultural, AgriculturalGrade, AgriculturalSoilScore};
pub use report::{generate_soil_report, DepthAnalysis, SoilQualityLabel, SoilQualityReport};
pub use land::{score_land_profile, Drainage, ErosionLevel, LandProfile, LandScore, SoilType};
