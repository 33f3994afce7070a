//! Merges real balances with the baseline catalog.

use std::sync::Arc;

use log::trace;

use super::balances_model::BalanceMap;
use super::baseline::{BaselineProvider, DefaultBaseline};
use crate::errors::Result;

/// Combines a sparse real balance map with the baseline catalog.
///
/// Every baseline token is present in the output with `real + baseline`, and
/// every real token outside the catalog is copied through unchanged. The merge
/// runs once per leaf map at every aggregation scope; merged maps are never
/// re-merged after summation.
#[derive(Clone)]
pub struct BalanceMerger {
    baseline: Arc<dyn BaselineProvider>,
}

impl Default for BalanceMerger {
    fn default() -> Self {
        Self::new(Arc::new(DefaultBaseline))
    }
}

impl BalanceMerger {
    pub fn new(baseline: Arc<dyn BaselineProvider>) -> Self {
        Self { baseline }
    }

    /// Returns a fresh copy of the baseline catalog.
    pub fn baseline(&self) -> BalanceMap {
        self.baseline.get_baseline()
    }

    /// Merges `real` into a fresh baseline. An absent map merges as empty.
    pub fn merge(&self, real: Option<&BalanceMap>) -> Result<BalanceMap> {
        let baseline = self.baseline.get_baseline();
        let mut merged = BalanceMap::with_capacity(baseline.len());

        for (symbol, baseline_record) in baseline {
            let real_amount = real
                .and_then(|balances| balances.get(&symbol))
                .map(|record| record.amount)
                .unwrap_or_default();
            let mut record = baseline_record;
            record.amount = real_amount.checked_add(record.amount)?;
            merged.insert(symbol, record);
        }

        if let Some(real) = real {
            for (symbol, record) in real {
                if !merged.contains_key(symbol) {
                    merged.insert(symbol.clone(), record.clone());
                }
            }
        }

        trace!(
            "Merged {} real balances into {} tokens",
            real.map_or(0, |balances| balances.len()),
            merged.len()
        );
        Ok(merged)
    }
}

/// Merges against the default zero catalog.
pub fn merge_with_default_balances(real: Option<&BalanceMap>) -> Result<BalanceMap> {
    BalanceMerger::default().merge(real)
}
