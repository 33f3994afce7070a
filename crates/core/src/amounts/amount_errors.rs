use thiserror::Error;

/// Errors raised by fixed-point amount arithmetic and encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount overflow: {lhs} + {rhs} exceeds 256 bits")]
    Overflow { lhs: String, rhs: String },

    #[error("Invalid amount encoding '{0}'")]
    InvalidEncoding(String),

    #[error("Amount {amount} does not fit the decimal range at scale {scale}")]
    OutOfDecimalRange { amount: String, scale: u32 },

    #[error("Unsupported unit scale {0}")]
    UnsupportedScale(u32),
}
