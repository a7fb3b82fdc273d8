//! Scoring error taxonomy
//!
//! Core scoring functions are total over well-formed input. Everything that
//! would otherwise surface as NaN or a fabricated number is reported here.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    /// A catalog entry violates `min < max` and `min <= ideal <= max`
    #[error("catalog '{catalog}': malformed range for '{property}': {reason}")]
    MalformedRange {
        catalog: String,
        property: String,
        reason: String,
    },

    #[error("catalog '{0}' has no entries")]
    EmptyCatalog(String),

    /// Nothing was scorable (no property present in both measurements and catalog)
    #[error("insufficient data to compute {0}")]
    InsufficientData(String),

    #[error("{name} must be a finite value within [0, 100], got {value}")]
    ScoreOutOfRange { name: &'static str, value: f64 },

    #[error("unknown depth band '{0}'")]
    UnknownDepth(String),

    #[error("unknown soil property '{0}'")]
    UnknownProperty(String),

    #[error("{field} must be a finite number, got {value}")]
    InvalidInput { field: &'static str, value: f64 },
}

impl ScoringError {
    pub(crate) fn insufficient(what: impl Into<String>) -> Self {
        ScoringError::InsufficientData(what.into())
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
