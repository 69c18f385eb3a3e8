//! Error taxonomy.
//!
//! Only configuration mistakes and output naming exhaustion are errors.
//! Unreliable detections are handled inside the detection policy by falling
//! back, and never surface here.

use thiserror::Error;

/// Invalid or missing configuration. Fatal: raised before any row is processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Text column must be set to a non-empty column name")]
    MissingTextColumn,

    #[error("Text column '{0}' not found in input schema")]
    UnknownTextColumn(String),

    #[error("Minimum score must be set")]
    MissingMinimumScore,

    #[error("Minimum score '{0}' is not a number")]
    InvalidMinimumScore(String),

    #[error("Minimum score must be between 0 and 1, got {0}")]
    MinimumScoreOutOfRange(f64),

    #[error("Language scope is empty")]
    EmptyLanguageScope,

    #[error("{0} not set")]
    MissingSetting(&'static str),

    #[error("Invalid value '{value}' for {name}")]
    InvalidSetting { name: &'static str, value: String },
}

/// Failure to derive a unique output column name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("Failed to generate a unique name for '{name}'")]
    Exhausted { name: String },
}
