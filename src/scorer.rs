//! Credit Scorer - Main coordinator for farmer credit assessment
//!
//! Ties the soil, crop suitability, weather and credit modules into one
//! pipeline:
//!
//! ```text
//! climate-adjusted catalog → soil report → agricultural score per depth
//!   → crop matching + classification → weather analysis + quality score
//!   → chosen soil score → aggregation
//! ```
//!
//! Catalogs are loaded and validated once in `CreditScorer::new`. Requests
//! share nothing mutable, so batches are scored in parallel with Rayon.

use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::catalog::{
    agricultural_standards, crop_requirements, ideal_soil_values, ClimateBand, CropCatalog, SoilCatalog,
};
use crate::config::{ScorerConfig, SoilScoreSource};
use crate::credit::{self, ApplicationScore, FarmApplication, LoanEligibility};
use crate::error::{Result, ScoringError};
use crate::soil::{generate_soil_report, score_agricultural, AgriculturalSoilScore, Depth, SoilProfile, SoilQualityReport};
use crate::suitability::{classify_crops, match_crops, CropMatch, CropSuitability};
use crate::weather::{analyze_weather, weather_quality_score, WeatherAnalysis, WeatherSample};

/// Everything needed to assess one farm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub soil_profile: SoilProfile,
    /// Oldest first
    #[serde(default)]
    pub historical: Vec<WeatherSample>,
    pub current: WeatherSample,
    /// Daily forecast samples (see `weather::group_forecast` for sub-daily data)
    #[serde(default)]
    pub forecast: Vec<WeatherSample>,
}

/// Aggregator inputs and decision
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditAssessment {
    pub weather_score: f64,
    pub soil_deviation_score: f64,
    pub soil_score_source: SoilScoreSource,
    pub final_score: f64,
    pub loan_eligibility: LoanEligibility,
}

/// Full output of one assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditReport {
    pub climate: ClimateBand,
    /// Absent when no depth had a property in the generic catalog
    pub soil_report: Option<SoilQualityReport>,
    /// Depths with nothing scorable are left out
    pub agricultural_scores: BTreeMap<Depth, AgriculturalSoilScore>,
    pub crop_match: CropMatch,
    pub crop_suitability: Vec<CropSuitability>,
    pub weather_analysis: WeatherAnalysis,
    pub assessment: CreditAssessment,
}

/// Main credit scorer
pub struct CreditScorer {
    config: ScorerConfig,
    crops: CropCatalog,
    standards: SoilCatalog,
}

impl CreditScorer {
    /// Initialize the scorer, loading catalog overrides from the config
    pub fn new(config: ScorerConfig) -> anyhow::Result<Self> {
        let crops = match &config.crop_catalog_path {
            Some(path) => CropCatalog::load(path)?,
            None => crop_requirements().context("Built-in crop catalog is invalid")?,
        };
        let standards = match &config.agricultural_catalog_path {
            Some(path) => SoilCatalog::load(path)?,
            None => agricultural_standards().context("Built-in agricultural standards are invalid")?,
        };

        info!(
            crops = crops.len(),
            standards = standards.name(),
            soil_score_source = ?config.soil_score_source,
            "Credit scorer initialized"
        );

        Ok(Self {
            config,
            crops,
            standards,
        })
    }

    /// Scorer with built-in catalogs and default settings
    pub fn with_defaults() -> anyhow::Result<Self> {
        Self::new(ScorerConfig::default())
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn crops(&self) -> &CropCatalog {
        &self.crops
    }

    /// Assess one farm
    ///
    /// # Errors
    /// - `InsufficientData` when the configured soil score source has nothing to
    ///   work with (no scorable depth, or no root-zone crop deviation)
    /// - `ScoreOutOfRange` if a score fed to the aggregator leaves [0, 100]
    pub fn assess(&self, request: &AssessmentRequest) -> Result<CreditReport> {
        let start = Instant::now();

        let climate_temp = self.config.climate_temperature_c.unwrap_or(request.current.temperature);
        if !climate_temp.is_finite() {
            return Err(ScoringError::InvalidInput {
                field: "climate_temperature_c",
                value: climate_temp,
            });
        }
        let climate = ClimateBand::from_temperature(climate_temp);
        let generic = ideal_soil_values(climate_temp)?;

        // Soil report (generic catalog)
        let soil_report = match generate_soil_report(&request.soil_profile, &generic) {
            Ok(report) => Some(report),
            Err(ScoringError::InsufficientData(what)) => {
                warn!(what = what.as_str(), "Soil report unavailable");
                None
            }
            Err(e) => return Err(e),
        };

        // Agricultural standards per depth
        let mut agricultural_scores = BTreeMap::new();
        for (depth, measured) in &request.soil_profile {
            match score_agricultural(measured, &self.standards) {
                Ok(score) => {
                    agricultural_scores.insert(*depth, score);
                }
                Err(ScoringError::InsufficientData(_)) => {
                    debug!(depth = depth.label(), "No agricultural standard measured");
                }
                Err(e) => return Err(e),
            }
        }

        // Crop suitability
        let crop_match = match_crops(&request.soil_profile, &self.crops);
        let crop_suitability = classify_crops(&crop_match, &self.crops);

        // Weather
        let weather_analysis = analyze_weather(&request.historical, &request.current, &request.forecast);
        let weather_score = weather_quality_score(&weather_analysis);

        let source = self.config.soil_score_source;
        let soil_deviation_score = match source {
            SoilScoreSource::SoilQualityReport => soil_report.as_ref().map(|r| r.average_score),
            SoilScoreSource::CropDeviation => crop_match.deviation_score,
        }
        .ok_or_else(|| ScoringError::insufficient(format!("soil score ({:?})", source)))?;

        let decision = credit::aggregate(weather_score, soil_deviation_score)?;

        info!(
            final_score = decision.final_score,
            tier = decision.eligibility.status.as_str(),
            climate = climate.display_name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Assessment complete"
        );

        Ok(CreditReport {
            climate,
            soil_report,
            agricultural_scores,
            crop_match,
            crop_suitability,
            weather_analysis,
            assessment: CreditAssessment {
                weather_score,
                soil_deviation_score,
                soil_score_source: source,
                final_score: decision.final_score,
                loan_eligibility: decision.eligibility,
            },
        })
    }

    /// Assess many farms in parallel
    ///
    /// Results come back in request order; one failing request does not abort
    /// the rest.
    pub fn assess_batch(&self, requests: &[AssessmentRequest]) -> Vec<Result<CreditReport>> {
        info!(requests = requests.len(), "Batch assessment started");
        let start = Instant::now();

        let results: Vec<_> = requests.par_iter().map(|request| self.assess(request)).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            requests = requests.len(),
            failed,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Batch assessment complete"
        );
        results
    }

    /// Score a loan application (second credit path)
    pub fn score_application(&self, application: &FarmApplication) -> Result<ApplicationScore> {
        credit::score_application(application)
    }
}
