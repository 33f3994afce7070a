//! FX module - display currencies, conversion rates and currency formatting.

pub mod currency;
mod conversion_rates;
mod currency_formatter;
mod fx_errors;

pub use conversion_rates::{ConversionRates, CurrencyRate};
pub use currency::CurrencyCode;
pub use currency_formatter::{format_decimal, format_with_threshold, FormatOptions, FormatStyle};
pub use fx_errors::FormatError;
