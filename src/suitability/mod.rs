//! Crop suitability
//!
//! Matches a depth profile against per-crop requirements (`matcher`), buckets
//! the depth-averaged scores (`classify`) and attaches remediation text
//! (`advice`).

pub mod advice;
pub mod classify;
pub mod matcher;

pub use advice::detailed_advice;
pub use classify::{classify_crops, CropSuitability, SuitabilityCategory};
pub use matcher::{match_crops, CropDepthScore, CropMatch, CROP_PROPERTY_WEIGHT};
