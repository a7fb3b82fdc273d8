//! AgroScore - farmer credit scoring from soil and weather evidence
//!
//! Turns soil measurements by depth and weather observations into a credit
//! score and a loan eligibility tier.
//!
//! - `soil/`: property scoring, soil quality report, agricultural and land scores
//! - `catalog/`: validated ideal-range catalogs (generic, agricultural, per-crop)
//! - `suitability/`: crop matching, classification and remediation advice
//! - `weather/`: forecast grouping, weather risk analysis and quality score
//! - `credit/`: score aggregation, loan tiers and the application path
//! - `data`: Polars loaders for the upstream soil and weather exports
//! - `scorer`: `CreditScorer`, the coordinator tying it all together

pub mod catalog;
pub mod config;
pub mod credit;
pub mod data;
pub mod error;
pub mod scorer;
pub mod soil;
pub mod suitability;
pub mod weather;

// Re-export commonly used types
pub use catalog::{ClimateBand, CropCatalog, CropProfile, IdealRange, SoilCatalog};
pub use config::{ScorerConfig, SoilScoreSource};
pub use credit::{ApplicationScore, FarmApplication, LoanEligibility, LoanTier};
pub use error::{Result, ScoringError};
pub use scorer::{AssessmentRequest, CreditAssessment, CreditReport, CreditScorer};
pub use soil::{Depth, SoilMeasurements, SoilProfile, SoilProperty};
pub use weather::{ForecastReading, WeatherAnalysis, WeatherSample};
