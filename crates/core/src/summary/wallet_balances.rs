//! Wallet-level balance summary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::balances::BalanceMerger;
use crate::errors::Result;
use crate::selectors::{
    select_wallet_group_fiat_total, select_wallet_total_fiat, DisplayContext, WalletBalance,
};

/// Display strings for a wallet and each of its groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalances {
    /// `None` while the wallet total is loading
    pub formatted_wallet_total_balance: Option<String>,
    /// Formatted total per group id
    pub group_totals: HashMap<String, String>,
}

/// Builds the wallet summary. Each group merges the baseline on its own.
pub fn compute_wallet_balances(
    wallet: Option<&WalletBalance>,
    merger: &BalanceMerger,
    display: &DisplayContext,
) -> Result<WalletBalances> {
    let wallet_total = select_wallet_total_fiat(wallet, &merger.baseline(), display)?;

    let mut group_totals = HashMap::new();
    for group in wallet.map(|w| w.groups.values()).into_iter().flatten() {
        let total = select_wallet_group_fiat_total(Some(group), &merger.baseline(), display)?;
        group_totals.insert(group.group_id.clone(), total.formatted.unwrap_or_default());
    }

    Ok(WalletBalances {
        formatted_wallet_total_balance: wallet_total.formatted,
        group_totals,
    })
}
