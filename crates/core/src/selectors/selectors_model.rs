//! Aggregate models produced by the selectors.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::fx::FormatOptions;
use crate::settings::BalanceSettings;

/// Fiat balance of one account group, as reported by the portfolio feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBalance {
    pub group_id: String,
    /// `None` while the feed has not priced the group yet
    pub total_balance_in_user_currency: Option<Decimal>,
}

/// Fiat balance of a wallet and its groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    pub wallet_id: String,
    /// `None` while the feed is still loading
    pub total_balance_in_user_currency: Option<Decimal>,
    pub groups: HashMap<String, GroupBalance>,
}

/// Snapshot of every wallet's fiat balance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalancesState {
    pub wallets: HashMap<String, WalletBalance>,
}

impl WalletBalancesState {
    pub fn new(wallets: impl IntoIterator<Item = WalletBalance>) -> Self {
        Self {
            wallets: wallets
                .into_iter()
                .map(|wallet| (wallet.wallet_id.clone(), wallet))
                .collect(),
        }
    }

    pub fn wallet(&self, wallet_id: &str) -> Option<&WalletBalance> {
        self.wallets.get(wallet_id)
    }

    /// Finds a group in any wallet.
    ///
    /// Group ids are expected to be unique across wallets. When several
    /// wallets share one, the wallet with the lowest id wins.
    pub fn group(&self, group_id: &str) -> Option<&GroupBalance> {
        self.wallets
            .iter()
            .filter_map(|(wallet_id, wallet)| Some((wallet_id, wallet.groups.get(group_id)?)))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, group)| group)
    }
}

/// A computed fiat total with its display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateTotal {
    /// Real total plus the baseline contribution
    pub raw: Decimal,
    /// `None` exactly when the real total is not known yet
    pub formatted: Option<String>,
}

impl AggregateTotal {
    pub fn is_loading(&self) -> bool {
        self.formatted.is_none()
    }
}

/// Currency, locale and threshold used to format fiat totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayContext {
    pub options: FormatOptions,
    pub locale: String,
    pub threshold: Decimal,
}

impl DisplayContext {
    pub fn from_settings(settings: &BalanceSettings) -> Result<Self> {
        Ok(Self {
            options: settings.format_options()?,
            locale: settings.locale.clone(),
            threshold: settings.negligible_threshold,
        })
    }
}
