//! Error types for the migration engine

use thiserror::Error;

/// Result type for migration operations
pub type Result<T> = std::result::Result<T, MigrationError>;

/// Migration errors
///
/// Extension-field validation is the only fatal surface of the engine; every
/// other malformed input degrades to a documented default. Each variant
/// carries the dotted path of the offending attribute (`group.child` for
/// nested attributes) and the value that failed.
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Invalid evaluation_method '{value}' for attribute '{attribute}': must be one of EXACT, NUMERIC_EXACT, FUZZY, SEMANTIC")]
    InvalidEvaluationMethod { attribute: String, value: String },

    #[error("Invalid confidence_threshold '{value}' for attribute '{attribute}': must be a number between 0 and 1")]
    InvalidConfidenceThreshold { attribute: String, value: String },

    #[error("confidence_threshold {value} for attribute '{attribute}' is out of range: must be between 0 and 1")]
    ThresholdOutOfRange { attribute: String, value: f64 },

    #[error("prompt_override for attribute '{attribute}' must be a string, got {found}")]
    InvalidPromptOverrideType { attribute: String, found: String },

    #[error("prompt_override for attribute '{attribute}' is too long: {length} characters (maximum {limit})")]
    PromptOverrideTooLong {
        attribute: String,
        length: usize,
        limit: usize,
    },
}
