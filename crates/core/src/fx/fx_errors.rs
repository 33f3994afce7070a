use thiserror::Error;

/// Errors raised at the formatting boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Cannot format non-finite value {0}")]
    NonFinite(f64),

    #[error("Currency code '{0}' is not a valid ISO 4217 code")]
    InvalidCurrency(String),
}
