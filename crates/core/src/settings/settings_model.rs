//! Settings that drive balance display.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CURRENCY, DEFAULT_LOCALE, DEFAULT_NATIVE_DECIMALS, DEFAULT_NATIVE_SYMBOL,
    MAX_UNIT_SCALE, NEGLIGIBLE_FIAT_THRESHOLD,
};
use crate::errors::{Result, ValidationError};
use crate::fx::{CurrencyCode, FormatOptions};

/// Display and filtering settings for the aggregation selectors.
///
/// Deserialized from the camelCase JSON the settings store persists; absent
/// keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BalanceSettings {
    /// Display currency code, any casing
    pub currency: String,
    /// BCP 47 locale tag
    pub locale: String,
    /// Whether balances on test networks count and convert to fiat
    pub show_fiat_in_testnets: bool,
    /// Fiat values below this render as a placeholder
    pub negligible_threshold: Decimal,
    /// Native token symbol of the selected chain family
    pub native_symbol: String,
    /// Decimals of the native token
    pub native_decimals: u32,
    /// Chain ids treated as test networks in addition to the built-in list
    pub extra_test_networks: Vec<String>,
}

impl Default for BalanceSettings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            show_fiat_in_testnets: false,
            negligible_threshold: NEGLIGIBLE_FIAT_THRESHOLD,
            native_symbol: DEFAULT_NATIVE_SYMBOL.to_string(),
            native_decimals: DEFAULT_NATIVE_DECIMALS,
            extra_test_networks: Vec::new(),
        }
    }
}

impl BalanceSettings {
    /// Parses and validates settings JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: BalanceSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.currency_code()?;
        if self.locale.trim().is_empty() {
            return Err(ValidationError::MissingField("locale".to_string()).into());
        }
        if self.native_symbol.is_empty() {
            return Err(ValidationError::MissingField("nativeSymbol".to_string()).into());
        }
        if self.negligible_threshold.is_sign_negative() {
            return Err(ValidationError::InvalidInput(format!(
                "negligibleThreshold must not be negative, got {}",
                self.negligible_threshold
            ))
            .into());
        }
        if self.native_decimals > MAX_UNIT_SCALE {
            return Err(ValidationError::InvalidInput(format!(
                "nativeDecimals must be at most {}, got {}",
                MAX_UNIT_SCALE, self.native_decimals
            ))
            .into());
        }
        Ok(())
    }

    /// Upper-cased display currency.
    pub fn currency_code(&self) -> Result<CurrencyCode> {
        Ok(CurrencyCode::parse(&self.currency)?)
    }

    pub fn format_options(&self) -> Result<FormatOptions> {
        Ok(FormatOptions::currency(self.currency_code()?))
    }
}
