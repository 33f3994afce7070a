//! Token to display-currency conversion rates.

use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balances::TokenSymbol;

/// Rate of one token in the display currency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    /// Price of one whole token in the display currency
    pub conversion_rate: Option<Decimal>,
    /// Price of one whole token in USD
    pub usd_conversion_rate: Option<Decimal>,
}

/// Conversion-rate table keyed by token symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionRates(HashMap<TokenSymbol, CurrencyRate>);

impl ConversionRates {
    pub fn new(rates: HashMap<TokenSymbol, CurrencyRate>) -> Self {
        Self(rates)
    }

    /// Adds or replaces the display-currency rate for `symbol`.
    pub fn with_rate(mut self, symbol: impl Into<TokenSymbol>, rate: Decimal) -> Self {
        self.0
            .entry(symbol.into())
            .or_default()
            .conversion_rate = Some(rate);
        self
    }

    pub fn conversion_rate(&self, symbol: &str) -> Option<Decimal> {
        self.0.get(symbol).and_then(|rate| rate.conversion_rate)
    }

    /// Rate for `symbol`, or one when the table has none.
    pub fn conversion_rate_or_one(&self, symbol: &str) -> Decimal {
        match self.conversion_rate(symbol) {
            Some(rate) => rate,
            None => {
                debug!("No conversion rate for {}, using 1", symbol);
                Decimal::ONE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_rate_lookup() {
        let rates = ConversionRates::default().with_rate("ETH", dec!(3120.5));
        assert_eq!(rates.conversion_rate("ETH"), Some(dec!(3120.5)));
        assert_eq!(rates.conversion_rate("BNB"), None);
    }

    #[test]
    fn test_missing_rate_defaults_to_one() {
        let rates = ConversionRates::default();
        assert_eq!(rates.conversion_rate_or_one("ETH"), Decimal::ONE);
    }

    #[test]
    fn test_rate_without_conversion_value_defaults_to_one() {
        let mut table = HashMap::new();
        table.insert(
            "ETH".to_string(),
            CurrencyRate {
                conversion_rate: None,
                usd_conversion_rate: Some(dec!(3000)),
            },
        );
        let rates = ConversionRates::new(table);
        assert_eq!(rates.conversion_rate_or_one("ETH"), Decimal::ONE);
    }

    #[test]
    fn test_deserializes_rate_table() {
        let json = r#"{"ETH":{"conversionRate":2000.25,"usdConversionRate":2000.25}}"#;
        let rates: ConversionRates = serde_json::from_str(json).unwrap();
        assert_eq!(rates.conversion_rate("ETH"), Some(dec!(2000.25)));
    }
}
