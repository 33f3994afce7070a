//! Core error types for the balance aggregation pipeline.
//!
//! Missing raw data is absorbed by the selectors (substituted with the baseline
//! or zero) and only shows up here as [`Error::MissingData`] on the internal
//! lookup paths. Arithmetic and formatting failures propagate to the caller.

use thiserror::Error;

use crate::amounts::AmountError;
use crate::fx::FormatError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the balance core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Amount arithmetic failed: {0}")]
    Amount(#[from] AmountError),

    #[error("Formatting failed: {0}")]
    Format(#[from] FormatError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Required balance data is missing: {0}")]
    MissingData(String),

    #[error("Selector cache error: {0}")]
    Cache(String),
}

/// Validation errors for settings and user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse settings: {0}")]
    SettingsParse(#[from] serde_json::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::SettingsParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
