//! Error types for Mindful Signals

use thiserror::Error;

/// Short reason reported when too few intervals survive parsing
pub const INSUFFICIENT_INTERVALS: &str = "insufficient intervals";

/// Validation failures for RR-interval input
///
/// These are surfaced directly to the caller. They are a pure function of the
/// input text, so retrying the same input always yields the same error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("insufficient intervals: need at least {required}, found {found}")]
    InsufficientIntervals { required: usize, found: usize },

    #[error("invalid interval token at position {index}: {token:?}")]
    InvalidToken { index: usize, token: String },

    #[error("interval at position {index} must be positive, got {value}")]
    NonPositiveInterval { index: usize, value: f64 },
}

impl ValidationError {
    /// Short machine-friendly reason, independent of the offending values
    pub fn reason(&self) -> &'static str {
        match self {
            ValidationError::InsufficientIntervals { .. } => INSUFFICIENT_INTERVALS,
            ValidationError::InvalidToken { .. } => "invalid token",
            ValidationError::NonPositiveInterval { .. } => "non-positive interval",
        }
    }
}

/// Errors raised by the surfaces around the analytics core
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse mood entries: {0}")]
    ParseError(String),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
