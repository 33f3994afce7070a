//! Baseline token catalog.

use rust_decimal::Decimal;

use super::balances_model::{BalanceMap, BalanceRecord};
use crate::amounts::AmountError;

/// Tokens that always appear in a merged balance map.
pub const BASELINE_SYMBOLS: [&str; 10] = [
    "ETH", "USDT", "USDC", "BNB", "MATIC", "SOL", "AVAX", "ARB", "OP", "BASE",
];

/// Supplies the baseline catalog merged into every real balance map.
pub trait BaselineProvider: Send + Sync {
    /// Returns a fresh catalog. Callers own the returned map and may mutate it.
    fn get_baseline(&self) -> BalanceMap;
}

/// The built-in catalog: every [`BASELINE_SYMBOLS`] entry at zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBaseline;

impl BaselineProvider for DefaultBaseline {
    fn get_baseline(&self) -> BalanceMap {
        default_balances()
    }
}

/// Builds the default catalog. A new map on every call.
pub fn default_balances() -> BalanceMap {
    BASELINE_SYMBOLS
        .iter()
        .map(|symbol| (symbol.to_string(), BalanceRecord::zero(*symbol)))
        .collect()
}

/// Sums the catalog amounts at face value, without unit scaling.
///
/// With the default catalog this is zero, but wallet totals still add it so a
/// non-zero baseline would show up in every total.
pub fn face_value_total(catalog: &BalanceMap) -> Result<Decimal, AmountError> {
    catalog.values().try_fold(Decimal::ZERO, |acc, record| {
        let value = record.amount.to_decimal_units(0)?;
        acc.checked_add(value)
            .ok_or_else(|| AmountError::OutOfDecimalRange {
                amount: record.amount.to_text(),
                scale: 0,
            })
    })
}
