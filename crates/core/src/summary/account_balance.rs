//! Native token balance summary for the selected account.

use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amounts::{
    minimal_unit_to_fiat, minimal_unit_to_fiat_number, render_from_minimal_unit, Amount,
};
use crate::balances::{AccountKey, BalanceMerger, ChainKey};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, FIAT_NUMBER_PRECISION, TOKEN_DISPLAY_DECIMALS};
use crate::errors::Result;
use crate::fx::{ConversionRates, CurrencyCode};
use crate::settings::BalanceSettings;

/// Staked balances have no baseline entry.
const STAKED_BASELINE: Amount = Amount::ZERO;

/// Native and staked balance of one account on one chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAccountBalance {
    pub balance: Option<Amount>,
    pub staked_balance: Option<Amount>,
}

/// Native balances keyed by chain, then account.
pub type AccountsByChainId = HashMap<ChainKey, HashMap<AccountKey, NativeAccountBalance>>;

/// Which account and chain to summarize.
#[derive(Debug, Clone, Copy)]
pub struct AccountBalanceRequest<'a> {
    pub accounts_by_chain_id: &'a AccountsByChainId,
    pub selected_address: Option<&'a str>,
    /// Explicit chain; the selected chain is used when `None`
    pub chain_id: Option<&'a str>,
    pub selected_chain_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalanceSummary {
    pub balance_wei: Amount,
    pub formatted_balance: String,
    pub balance_fiat: String,
    pub balance_fiat_number: Decimal,
    pub staked_balance_wei: Amount,
    pub formatted_staked_balance: String,
    pub staked_balance_fiat_number: Decimal,
    pub formatted_staked_balance_fiat: String,
    pub conversion_rate: Decimal,
    pub current_currency: CurrencyCode,
}

/// Summarizes the native balance of the selected account, merged with the
/// baseline native amount. Missing account or chain data counts as zero.
pub fn account_balance_summary(
    request: &AccountBalanceRequest<'_>,
    merger: &BalanceMerger,
    rates: &ConversionRates,
    settings: &BalanceSettings,
) -> Result<AccountBalanceSummary> {
    let chain_id = request.chain_id.unwrap_or(request.selected_chain_id);
    let account = request
        .selected_address
        .filter(|address| !address.is_empty())
        .and_then(|address| request.accounts_by_chain_id.get(chain_id)?.get(address));
    if account.is_none() {
        debug!("No native balance for selected account on {}", chain_id);
    }

    let baseline_native = merger
        .baseline()
        .get(&settings.native_symbol)
        .map(|record| record.amount)
        .unwrap_or_default();
    let balance_wei = account
        .and_then(|a| a.balance)
        .unwrap_or_default()
        .checked_add(baseline_native)?;
    let staked_balance_wei = account
        .and_then(|a| a.staked_balance)
        .unwrap_or_default()
        .checked_add(STAKED_BASELINE)?;

    let currency = settings.currency_code()?;
    let conversion_rate = rates.conversion_rate_or_one(&settings.native_symbol);
    let decimals = settings.native_decimals;
    let locale = settings.locale.as_str();

    Ok(AccountBalanceSummary {
        balance_wei,
        formatted_balance: render_from_minimal_unit(balance_wei, decimals, TOKEN_DISPLAY_DECIMALS)?,
        balance_fiat: minimal_unit_to_fiat(
            balance_wei,
            decimals,
            conversion_rate,
            &currency,
            locale,
            DISPLAY_DECIMAL_PRECISION,
        )?,
        balance_fiat_number: minimal_unit_to_fiat_number(
            balance_wei,
            decimals,
            conversion_rate,
            DISPLAY_DECIMAL_PRECISION,
        )?,
        staked_balance_wei,
        formatted_staked_balance: render_from_minimal_unit(
            staked_balance_wei,
            decimals,
            TOKEN_DISPLAY_DECIMALS,
        )?,
        staked_balance_fiat_number: minimal_unit_to_fiat_number(
            staked_balance_wei,
            decimals,
            conversion_rate,
            FIAT_NUMBER_PRECISION,
        )?,
        formatted_staked_balance_fiat: minimal_unit_to_fiat(
            staked_balance_wei,
            decimals,
            conversion_rate,
            &currency,
            locale,
            DISPLAY_DECIMAL_PRECISION,
        )?,
        conversion_rate,
        current_currency: currency,
    })
}
