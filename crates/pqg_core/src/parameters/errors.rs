//! Error types for parameter editing and validation.

use thiserror::Error;

/// Errors raised while reading, editing or validating parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Unknown parameter '{0}'")]
    UnknownKey(String),

    #[error("Parameter '{key}' expects {expected}")]
    WrongKind { key: String, expected: &'static str },

    #[error("Parameter '{key}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("'{value}' is not a valid {kind}")]
    UnknownChoice { kind: String, value: String },

    #[error("Invalid charge state range {min}..{max}")]
    InvalidChargeRange { min: u32, max: u32 },

    #[error("Invalid parameters: {0}")]
    Invalid(String),

    #[error("Parameter serialization failed: {0}")]
    Serialization(String),
}

impl ParameterError {
    pub fn unknown_key(key: impl Into<String>) -> Self {
        Self::UnknownKey(key.into())
    }

    pub fn wrong_kind(key: impl Into<String>, expected: &'static str) -> Self {
        Self::WrongKind {
            key: key.into(),
            expected,
        }
    }

    pub fn out_of_range(key: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        Self::OutOfRange {
            key: key.into(),
            min,
            max,
            value,
        }
    }

    pub fn unknown_choice(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownChoice {
            kind: kind.into(),
            value: value.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

impl From<serde_json::Error> for ParameterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for parameter operations.
pub type ParameterResult<T> = Result<T, ParameterError>;
