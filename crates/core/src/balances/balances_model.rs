//! Balance domain models.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::amounts::Amount;

/// Token identifier (`"ETH"`, `"USDC"`, or a token contract address).
/// Case-sensitive.
pub type TokenSymbol = String;

/// Account address. Not validated by this crate.
pub type AccountKey = String;

/// Chain identifier (e.g. `"0x1"`). Not validated by this crate.
pub type ChainKey = String;

/// A single token balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    /// Balance in the token's smallest unit
    pub amount: Amount,
    /// Display unit
    pub unit: TokenSymbol,
}

impl BalanceRecord {
    pub fn new(amount: Amount, unit: impl Into<TokenSymbol>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }

    pub fn zero(unit: impl Into<TokenSymbol>) -> Self {
        Self::new(Amount::ZERO, unit)
    }
}

/// Token balances of one account on one chain. A missing key means the
/// balance is unknown, not zero.
pub type BalanceMap = HashMap<TokenSymbol, BalanceRecord>;

/// Balances of one account, per chain.
pub type ChainBalances = HashMap<ChainKey, BalanceMap>;

/// Balances of every account, per chain.
pub type AccountBalances = HashMap<AccountKey, ChainBalances>;

/// Raw token balances as published by the balance feed.
///
/// Shared as an immutable `Arc` snapshot; a new feed update produces a new
/// snapshot rather than mutating this one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalancesState {
    pub token_balances: AccountBalances,
}

impl TokenBalancesState {
    pub fn new(token_balances: AccountBalances) -> Self {
        Self { token_balances }
    }

    pub fn account(&self, account: &str) -> Option<&ChainBalances> {
        self.token_balances.get(account)
    }

    pub fn chain(&self, account: &str, chain: &str) -> Option<&BalanceMap> {
        self.account(account).and_then(|chains| chains.get(chain))
    }

    pub fn token(&self, account: &str, chain: &str, token: &str) -> Option<&BalanceRecord> {
        self.chain(account, chain)
            .and_then(|balances| balances.get(token))
    }
}
