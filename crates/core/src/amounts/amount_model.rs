//! Fixed-point balance amounts.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::amount_errors::AmountError;
use crate::constants::MAX_UNIT_SCALE;

/// A non-negative balance expressed in the smallest indivisible unit of an
/// asset (wei for ether).
///
/// Arithmetic is exact. The text form is `0x`-prefixed lowercase hex, which is
/// also what the raw balance feed carries, so `from_text(to_text(a)) == a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(U256);

impl Amount {
    pub const ZERO: Amount = Amount(U256::ZERO);

    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Exact addition. Exceeding 256 bits is an error, never a wrap.
    pub fn checked_add(self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or_else(|| AmountError::Overflow {
                lhs: self.to_text(),
                rhs: other.to_text(),
            })
    }

    /// Sums amounts, failing on the first overflow.
    pub fn checked_sum<I>(amounts: I) -> Result<Amount, AmountError>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |acc, amount| acc.checked_add(amount))
    }

    pub fn to_text(&self) -> String {
        format!("0x{:x}", self.0)
    }

    /// Parses the hex text encoding. The `0x` prefix is optional and a bare
    /// `0x` reads as zero.
    pub fn from_text(text: &str) -> Result<Amount, AmountError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AmountError::InvalidEncoding(text.to_string()));
        }

        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return Ok(Amount::ZERO);
        }

        U256::from_str_radix(digits, 16)
            .map(Amount)
            .map_err(|_| AmountError::InvalidEncoding(text.to_string()))
    }

    /// Lossy conversion to a floating number of whole units. Display only.
    pub fn to_decimal(&self, unit_scale: u32) -> f64 {
        let magnitude = self.0.to_string().parse::<f64>().unwrap_or(f64::MAX);
        magnitude / 10f64.powi(unit_scale as i32)
    }

    /// Exact conversion to whole units as a `Decimal`.
    ///
    /// Fails when the magnitude does not fit the 96-bit decimal mantissa.
    pub fn to_decimal_units(&self, unit_scale: u32) -> Result<Decimal, AmountError> {
        if unit_scale > MAX_UNIT_SCALE {
            return Err(AmountError::UnsupportedScale(unit_scale));
        }

        let out_of_range = || AmountError::OutOfDecimalRange {
            amount: self.0.to_string(),
            scale: unit_scale,
        };
        let magnitude = u128::try_from(self.0).map_err(|_| out_of_range())?;
        let signed = i128::try_from(magnitude).map_err(|_| out_of_range())?;
        Decimal::try_from_i128_with_scale(signed, unit_scale).map_err(|_| out_of_range())
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(U256::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Amount(U256::from(value))
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Amount(value)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::from_text(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_text())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Amount::from_text(&text).map_err(serde::de::Error::custom)
    }
}
