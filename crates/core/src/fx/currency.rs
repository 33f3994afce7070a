//! Validated display currency codes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::fx_errors::FormatError;

/// Currencies whose minor unit is not hundredths.
const ZERO_DECIMAL_CURRENCIES: [&str; 6] = ["JPY", "KRW", "VND", "CLP", "ISK", "UGX"];

/// Display symbols for common currencies. Anything else renders with its code.
const CURRENCY_SYMBOLS: [(&str, &str); 16] = [
    ("USD", "$"),
    ("EUR", "€"),
    ("GBP", "£"),
    ("JPY", "¥"),
    ("CNY", "CN¥"),
    ("INR", "₹"),
    ("KRW", "₩"),
    ("BRL", "R$"),
    ("CAD", "CA$"),
    ("AUD", "A$"),
    ("NZD", "NZ$"),
    ("MXN", "MX$"),
    ("HKD", "HK$"),
    ("TWD", "NT$"),
    ("ILS", "₪"),
    ("VND", "₫"),
];

/// An upper-cased three letter ISO 4217 currency code.
///
/// Display currencies arrive in whatever casing the settings store holds
/// (`"usd"`); they are normalized once here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(code: &str) -> Result<Self, FormatError> {
        let normalized = code.trim().to_ascii_uppercase();
        if normalized.len() == 3 && normalized.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(normalized))
        } else {
            Err(FormatError::InvalidCurrency(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> Option<&'static str> {
        CURRENCY_SYMBOLS
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, symbol)| *symbol)
    }

    /// Number of fraction digits shown for this currency.
    pub fn fraction_digits(&self) -> u32 {
        if ZERO_DECIMAL_CURRENCIES.contains(&self.0.as_str()) {
            0
        } else {
            2
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
