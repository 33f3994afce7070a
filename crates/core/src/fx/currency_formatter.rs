//! Threshold-aware, locale-aware currency formatting.

use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::currency::CurrencyCode;
use super::fx_errors::FormatError;

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

/// Fraction digits shown by [`FormatStyle::Decimal`] before trimming.
const DECIMAL_STYLE_MAX_DIGITS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum FormatStyle {
    /// Amount with currency symbol and the currency's minor-unit digits
    #[default]
    Currency,
    /// Plain grouped number, up to three fraction digits
    Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatOptions {
    pub style: FormatStyle,
    pub currency: CurrencyCode,
}

impl FormatOptions {
    /// Validates and upper-cases `currency`.
    pub fn new(style: FormatStyle, currency: &str) -> Result<Self, FormatError> {
        Ok(Self {
            style,
            currency: CurrencyCode::parse(currency)?,
        })
    }

    pub fn currency(currency: CurrencyCode) -> Self {
        Self {
            style: FormatStyle::Currency,
            currency,
        }
    }

    fn fraction_digits(&self) -> u32 {
        match self.style {
            FormatStyle::Currency => self.currency.fraction_digits(),
            FormatStyle::Decimal => DECIMAL_STYLE_MAX_DIGITS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPlacement {
    /// `$5.50`
    Prefix,
    /// `R$ 5,50`
    PrefixSpaced,
    /// `5,50 €`
    SuffixSpaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocaleConventions {
    group_separator: &'static str,
    decimal_separator: &'static str,
    placement: SymbolPlacement,
}

const EN_CONVENTIONS: LocaleConventions = LocaleConventions {
    group_separator: ",",
    decimal_separator: ".",
    placement: SymbolPlacement::Prefix,
};

impl LocaleConventions {
    /// Resolves a BCP 47 tag such as `en-US` or `pt_BR`. Unknown languages
    /// fall back to English conventions.
    fn for_locale(locale: &str) -> Self {
        let mut parts = locale.split(['-', '_']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts.next().unwrap_or_default().to_ascii_uppercase();

        match (language.as_str(), region.as_str()) {
            ("en" | "ja" | "zh" | "ko" | "th" | "he", _) => EN_CONVENTIONS,
            ("de", "CH") => Self::new("’", ".", SymbolPlacement::PrefixSpaced),
            ("de" | "es" | "it" | "id" | "el", _) => {
                Self::new(".", ",", SymbolPlacement::SuffixSpaced)
            }
            ("pt", "PT") => Self::new(NBSP, ",", SymbolPlacement::SuffixSpaced),
            ("pt" | "nl", _) => Self::new(".", ",", SymbolPlacement::PrefixSpaced),
            ("fr", _) => Self::new(NARROW_NBSP, ",", SymbolPlacement::SuffixSpaced),
            ("ru" | "pl" | "sv" | "nb" | "fi" | "cs" | "uk", _) => {
                Self::new(NBSP, ",", SymbolPlacement::SuffixSpaced)
            }
            _ => {
                warn!("Unsupported locale '{}', formatting with en-US conventions", locale);
                EN_CONVENTIONS
            }
        }
    }

    const fn new(
        group_separator: &'static str,
        decimal_separator: &'static str,
        placement: SymbolPlacement,
    ) -> Self {
        Self {
            group_separator,
            decimal_separator,
            placement,
        }
    }
}

/// Formats `value` for display, replacing non-zero magnitudes below
/// `threshold` with a `<threshold` placeholder.
///
/// ```
/// use multichain_balances_core::fx::{format_with_threshold, FormatOptions, FormatStyle};
///
/// let usd = FormatOptions::new(FormatStyle::Currency, "usd").unwrap();
/// assert_eq!(format_with_threshold(5.5, 0.01, "en-US", &usd).unwrap(), "$5.50");
/// assert_eq!(format_with_threshold(0.005, 0.01, "en-US", &usd).unwrap(), "<$0.01");
/// assert_eq!(format_with_threshold(0.0, 0.01, "en-US", &usd).unwrap(), "$0.00");
/// ```
///
/// Only NaN and infinities are rejected. Ties round away from zero, the same
/// as [`format_decimal`].
pub fn format_with_threshold(
    value: f64,
    threshold: f64,
    locale: &str,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError::NonFinite(value));
    }
    if !threshold.is_finite() {
        return Err(FormatError::NonFinite(threshold));
    }

    match (as_decimal(value), as_decimal(threshold)) {
        (Some(value), Some(threshold)) => Ok(format_decimal(value, threshold, locale, options)),
        _ => Ok(format_float(value, threshold, locale, options)),
    }
}

/// Shortest decimal form of a finite float. `None` when it is outside the
/// decimal range or underflows to zero.
fn as_decimal(value: f64) -> Option<Decimal> {
    let decimal = value.to_string().parse::<Decimal>().ok()?;
    (decimal.is_zero() == (value == 0.0)).then_some(decimal)
}

/// Float rendering for magnitudes `Decimal` cannot hold.
fn format_float(value: f64, threshold: f64, locale: &str, options: &FormatOptions) -> String {
    let conventions = LocaleConventions::for_locale(locale);
    let digits = options.fraction_digits() as usize;
    let threshold = threshold.abs();

    if value == 0.0 {
        render(&conventions, options, false, &format!("{:.*}", digits, 0.0))
    } else if value.abs() < threshold {
        negligible(render(
            &conventions,
            options,
            false,
            &format!("{:.*}", digits, threshold),
        ))
    } else {
        render(
            &conventions,
            options,
            value < 0.0,
            &format!("{:.*}", digits, value.abs()),
        )
    }
}

/// Decimal counterpart of [`format_with_threshold`]. Decimals are always
/// finite, so this cannot fail.
pub fn format_decimal(
    value: Decimal,
    threshold: Decimal,
    locale: &str,
    options: &FormatOptions,
) -> String {
    let conventions = LocaleConventions::for_locale(locale);
    let digits = options.fraction_digits();
    let threshold = threshold.abs();

    let fixed = |amount: Decimal| {
        let rounded = amount.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.*}", digits as usize, rounded)
    };

    if value.is_zero() {
        render(&conventions, options, false, &fixed(Decimal::ZERO))
    } else if value.abs() < threshold {
        negligible(render(&conventions, options, false, &fixed(threshold)))
    } else {
        render(
            &conventions,
            options,
            value.is_sign_negative(),
            &fixed(value.abs()),
        )
    }
}

fn negligible(formatted: String) -> String {
    format!("<{}", formatted)
}

/// Lays out an unsigned fixed-point string (`"1234.50"`) per locale and style.
fn render(
    conventions: &LocaleConventions,
    options: &FormatOptions,
    negative: bool,
    plain: &str,
) -> String {
    let (integer, fraction) = plain.split_once('.').unwrap_or((plain, ""));
    let fraction = match options.style {
        FormatStyle::Currency => fraction,
        FormatStyle::Decimal => fraction.trim_end_matches('0'),
    };

    let mut number = group_digits(integer, conventions.group_separator);
    if !fraction.is_empty() {
        number.push_str(conventions.decimal_separator);
        number.push_str(fraction);
    }

    let sign = if negative { "-" } else { "" };
    if options.style == FormatStyle::Decimal {
        return format!("{}{}", sign, number);
    }

    let (symbol, placement) = match options.currency.symbol() {
        Some(symbol) => (symbol, conventions.placement),
        None if conventions.placement == SymbolPlacement::Prefix => {
            (options.currency.as_str(), SymbolPlacement::PrefixSpaced)
        }
        None => (options.currency.as_str(), conventions.placement),
    };

    match placement {
        SymbolPlacement::Prefix => format!("{}{}{}", sign, symbol, number),
        SymbolPlacement::PrefixSpaced => format!("{}{}{}{}", sign, symbol, NBSP, number),
        SymbolPlacement::SuffixSpaced => format!("{}{}{}{}", sign, number, NBSP, symbol),
    }
}

fn group_digits(integer: &str, separator: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}
