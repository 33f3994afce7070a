//! Pure selector functions over raw balance snapshots.
//!
//! Each function depends only on its arguments. [`super::AggregationSelectors`]
//! wraps them with memoization; calling them directly gives identical results.

use log::debug;
use rust_decimal::Decimal;

use super::selectors_model::{AggregateTotal, DisplayContext, GroupBalance, WalletBalance};
use super::selectors_traits::NetworkClassifier;
use crate::balances::{
    face_value_total, AccountBalances, BalanceMap, BalanceMerger, ChainBalances,
    TokenBalancesState,
};
use crate::amounts::AmountError;
use crate::errors::{Error, Result};
use crate::fx::format_decimal;

fn raw_chain_balances<'a>(
    state: &'a TokenBalancesState,
    account: &str,
    chain: &str,
) -> Result<&'a BalanceMap> {
    state
        .account(account)
        .ok_or_else(|| Error::MissingData(format!("no balances for account {}", account)))?
        .get(chain)
        .ok_or_else(|| {
            Error::MissingData(format!(
                "no balances for account {} on chain {}",
                account, chain
            ))
        })
}

/// Turns a missing-data lookup into `None`; other errors pass through.
fn absorb_missing<T>(lookup: Result<T>) -> Result<Option<T>> {
    match lookup {
        Ok(value) => Ok(Some(value)),
        Err(Error::MissingData(what)) => {
            debug!("{}, substituting baseline", what);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Merged balances of one account on one chain.
pub fn select_contract_balances(
    state: &TokenBalancesState,
    merger: &BalanceMerger,
    account: &str,
    chain: &str,
) -> Result<BalanceMap> {
    let real = absorb_missing(raw_chain_balances(state, account, chain))?;
    merger.merge(real)
}

/// Merged balances of one account on every chain it has data for.
pub fn select_contract_balances_per_chain(
    state: &TokenBalancesState,
    merger: &BalanceMerger,
    account: &str,
) -> Result<ChainBalances> {
    let Some(chains) = state.account(account) else {
        debug!("No balances for account {}", account);
        return Ok(ChainBalances::new());
    };

    chains
        .iter()
        .map(|(chain, real)| Ok((chain.clone(), merger.merge(Some(real))?)))
        .collect()
}

/// Merged balances of every account on every chain.
pub fn select_all_token_balances(
    state: &TokenBalancesState,
    merger: &BalanceMerger,
) -> Result<AccountBalances> {
    state
        .token_balances
        .keys()
        .map(|account| {
            Ok((
                account.clone(),
                select_contract_balances_per_chain(state, merger, account)?,
            ))
        })
        .collect()
}

/// Whether any account has at least one token entry on any chain.
///
/// Reads the raw data; the baseline would make this always true.
pub fn select_has_any_balance(state: &TokenBalancesState) -> bool {
    state
        .token_balances
        .values()
        .flat_map(|chains| chains.values())
        .any(|balances| !balances.is_empty())
}

/// The raw record of one token, as a map with zero or one entry.
pub fn select_single_token_balance(
    state: &TokenBalancesState,
    account: &str,
    chain: &str,
    token: &str,
) -> BalanceMap {
    state
        .token(account, chain, token)
        .map(|record| BalanceMap::from([(token.to_string(), record.clone())]))
        .unwrap_or_default()
}

/// Whether `account` holds a non-zero raw balance on any counted chain.
///
/// Test networks only count when `show_fiat_in_testnets` is set. An empty
/// address never has balances.
pub fn select_address_has_token_balances(
    state: &TokenBalancesState,
    account: &str,
    show_fiat_in_testnets: bool,
    networks: &dyn NetworkClassifier,
) -> bool {
    if account.is_empty() {
        return false;
    }
    let Some(chains) = state.account(account) else {
        return false;
    };

    chains.iter().any(|(chain, balances)| {
        if networks.is_test_network(chain) && !show_fiat_in_testnets {
            debug!("Skipping test network {} for {}", chain, account);
            return false;
        }
        balances.values().any(|record| !record.amount.is_zero())
    })
}

fn add_baseline_face_value(real_total: Decimal, baseline: &BalanceMap) -> Result<Decimal> {
    let baseline_total = face_value_total(baseline)?;
    real_total.checked_add(baseline_total).ok_or_else(|| {
        Error::from(AmountError::OutOfDecimalRange {
            amount: format!("{} + {}", real_total, baseline_total),
            scale: 0,
        })
    })
}

/// Fiat total of a wallet: real total (zero when unknown) plus the baseline
/// at face value. The display string is absent while the real total is unknown.
pub fn select_wallet_total_fiat(
    wallet: Option<&WalletBalance>,
    baseline: &BalanceMap,
    display: &DisplayContext,
) -> Result<AggregateTotal> {
    let real_total = wallet.and_then(|w| w.total_balance_in_user_currency);
    let raw = add_baseline_face_value(real_total.unwrap_or(Decimal::ZERO), baseline)?;

    let formatted = real_total
        .map(|_| format_decimal(raw, display.threshold, &display.locale, &display.options));
    Ok(AggregateTotal { raw, formatted })
}

/// Fiat total of a wallet group. Groups always format; an unknown total
/// counts as zero.
pub fn select_wallet_group_fiat_total(
    group: Option<&GroupBalance>,
    baseline: &BalanceMap,
    display: &DisplayContext,
) -> Result<AggregateTotal> {
    let real_total = group
        .and_then(|g| g.total_balance_in_user_currency)
        .unwrap_or(Decimal::ZERO);
    let raw = add_baseline_face_value(real_total, baseline)?;

    Ok(AggregateTotal {
        raw,
        formatted: Some(format_decimal(
            raw,
            display.threshold,
            &display.locale,
            &display.options,
        )),
    })
}
