//! Conversions from minimal units (wei) to display units and fiat.

use alloy_primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};

use super::amount_errors::AmountError;
use super::amount_model::Amount;
use crate::constants::MAX_UNIT_SCALE;
use crate::fx::{format_decimal, CurrencyCode, FormatOptions};
use crate::Result;

fn pow10(exp: u32) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

/// Renders an amount in whole units, rounded half-up to `display_decimals`
/// fraction digits with trailing zeros trimmed.
///
/// `2_500_000_000_000_000_000` wei at 18 decimals renders as `"2.5"`.
pub fn render_from_minimal_unit(
    amount: Amount,
    decimals: u32,
    display_decimals: u32,
) -> std::result::Result<String, AmountError> {
    if decimals > MAX_UNIT_SCALE {
        return Err(AmountError::UnsupportedScale(decimals));
    }
    let shown = display_decimals.min(decimals);

    // Work in units of 10^-shown so rounding happens once, exactly.
    let step = pow10(decimals - shown);
    let raw = amount.as_u256();
    let mut scaled = raw / step;
    let remainder = raw % step;
    if !remainder.is_zero() && remainder * U256::from(2u64) >= step {
        scaled += U256::from(1u64);
    }

    let divisor = pow10(shown);
    let whole = scaled / divisor;
    let fraction = scaled % divisor;
    if shown == 0 || fraction.is_zero() {
        return Ok(whole.to_string());
    }

    let fraction = format!("{:0>width$}", fraction.to_string(), width = shown as usize);
    Ok(format!("{}.{}", whole, fraction.trim_end_matches('0')))
}

/// Converts minimal units to a fiat number at `conversion_rate`, rounded to
/// `decimal_places`.
pub fn minimal_unit_to_fiat_number(
    amount: Amount,
    decimals: u32,
    conversion_rate: Decimal,
    decimal_places: u32,
) -> std::result::Result<Decimal, AmountError> {
    let units = amount.to_decimal_units(decimals)?;
    let value = units
        .checked_mul(conversion_rate)
        .ok_or_else(|| AmountError::OutOfDecimalRange {
            amount: amount.to_text(),
            scale: decimals,
        })?;
    Ok(value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero))
}

/// Converts minimal units to a formatted fiat string in `currency`.
///
/// No negligible threshold applies here: a tiny non-zero value renders as the
/// rounded figure.
pub fn minimal_unit_to_fiat(
    amount: Amount,
    decimals: u32,
    conversion_rate: Decimal,
    currency: &CurrencyCode,
    locale: &str,
    decimal_places: u32,
) -> Result<String> {
    let value = minimal_unit_to_fiat_number(amount, decimals, conversion_rate, decimal_places)?;
    let options = FormatOptions::currency(currency.clone());
    Ok(format_decimal(value, Decimal::ZERO, locale, &options))
}
