//! Memoizing selector service.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::debug;

use super::balance_selectors::{
    select_address_has_token_balances, select_all_token_balances, select_contract_balances,
    select_contract_balances_per_chain, select_has_any_balance, select_single_token_balance,
    select_wallet_group_fiat_total, select_wallet_total_fiat,
};
use super::memo_cache::{MemoCache, MemoStats};
use super::selectors_model::{AggregateTotal, DisplayContext, WalletBalancesState};
use super::selectors_traits::NetworkClassifier;
use crate::balances::{
    AccountBalances, AccountKey, BalanceMap, BalanceMerger, ChainBalances, ChainKey,
    TokenBalancesState, TokenSymbol,
};
use crate::errors::{Error, Result};
use crate::settings::BalanceSettings;
use crate::summary::{compute_wallet_balances, WalletBalances};

type TokenSource = Arc<TokenBalancesState>;
type TokenSettingsSource = (Arc<TokenBalancesState>, Arc<BalanceSettings>);
type WalletSource = (Arc<WalletBalancesState>, Arc<BalanceSettings>);

/// Balance selectors over the current raw-state snapshots.
///
/// The integration layer publishes new snapshots with
/// [`set_token_balances`](Self::set_token_balances) and
/// [`set_wallet_balances`](Self::set_wallet_balances). Every selector result is
/// cached per argument until one of its inputs is replaced.
pub struct AggregationSelectors {
    merger: BalanceMerger,
    networks: Arc<dyn NetworkClassifier>,
    settings: RwLock<Arc<BalanceSettings>>,
    token_balances: RwLock<TokenSource>,
    wallet_balances: RwLock<Arc<WalletBalancesState>>,

    contract_balances: MemoCache<TokenSource, (AccountKey, ChainKey), BalanceMap>,
    contract_balances_per_chain: MemoCache<TokenSource, AccountKey, ChainBalances>,
    all_token_balances: MemoCache<TokenSource, (), AccountBalances>,
    has_any_balance: MemoCache<TokenSource, (), bool>,
    single_token_balance: MemoCache<TokenSource, (AccountKey, ChainKey, TokenSymbol), BalanceMap>,
    address_has_balances: MemoCache<TokenSettingsSource, AccountKey, bool>,
    wallet_totals: MemoCache<WalletSource, String, AggregateTotal>,
    group_totals: MemoCache<WalletSource, String, AggregateTotal>,
    wallet_summaries: MemoCache<WalletSource, String, WalletBalances>,
}

impl AggregationSelectors {
    /// Creates the selectors with empty snapshots.
    pub fn new(
        merger: BalanceMerger,
        networks: Arc<dyn NetworkClassifier>,
        settings: BalanceSettings,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            merger,
            networks,
            settings: RwLock::new(Arc::new(settings)),
            token_balances: RwLock::new(Arc::new(TokenBalancesState::default())),
            wallet_balances: RwLock::new(Arc::new(WalletBalancesState::default())),
            contract_balances: MemoCache::new("contract_balances"),
            contract_balances_per_chain: MemoCache::new("contract_balances_per_chain"),
            all_token_balances: MemoCache::new("all_token_balances"),
            has_any_balance: MemoCache::new("has_any_balance"),
            single_token_balance: MemoCache::new("single_token_balance"),
            address_has_balances: MemoCache::new("address_has_balances"),
            wallet_totals: MemoCache::new("wallet_totals"),
            group_totals: MemoCache::new("group_totals"),
            wallet_summaries: MemoCache::new("wallet_summaries"),
        })
    }

    /// Publishes a new raw token balance snapshot.
    pub fn set_token_balances(&self, snapshot: Arc<TokenBalancesState>) -> Result<()> {
        let mut current = self
            .token_balances
            .write()
            .map_err(|e| Error::Cache(e.to_string()))?;
        debug!(
            "Token balance snapshot replaced ({} accounts)",
            snapshot.token_balances.len()
        );
        *current = snapshot;
        Ok(())
    }

    /// Publishes a new wallet fiat balance snapshot.
    pub fn set_wallet_balances(&self, snapshot: Arc<WalletBalancesState>) -> Result<()> {
        let mut current = self
            .wallet_balances
            .write()
            .map_err(|e| Error::Cache(e.to_string()))?;
        *current = snapshot;
        Ok(())
    }

    /// Validates and applies new settings.
    pub fn update_settings(&self, settings: BalanceSettings) -> Result<()> {
        settings.validate()?;
        let mut current = self
            .settings
            .write()
            .map_err(|e| Error::Cache(e.to_string()))?;
        *current = Arc::new(settings);
        Ok(())
    }

    pub fn settings(&self) -> Result<Arc<BalanceSettings>> {
        self.settings
            .read()
            .map(|settings| Arc::clone(&settings))
            .map_err(|e| Error::Cache(e.to_string()))
    }

    fn token_snapshot(&self) -> Result<TokenSource> {
        self.token_balances
            .read()
            .map(|snapshot| Arc::clone(&snapshot))
            .map_err(|e| Error::Cache(e.to_string()))
    }

    fn wallet_source(&self) -> Result<WalletSource> {
        let wallets = self
            .wallet_balances
            .read()
            .map(|snapshot| Arc::clone(&snapshot))
            .map_err(|e| Error::Cache(e.to_string()))?;
        Ok((wallets, self.settings()?))
    }

    /// Merged balances of `account` on `chain`.
    pub fn per_account_per_chain(&self, account: &str, chain: &str) -> Result<BalanceMap> {
        let snapshot = self.token_snapshot()?;
        self.contract_balances.get_or_compute(
            &snapshot,
            (account.to_string(), chain.to_string()),
            || select_contract_balances(&snapshot, &self.merger, account, chain),
        )
    }

    /// Merged balances of `account` on every chain it has data for.
    pub fn per_account_all_chains(&self, account: &str) -> Result<ChainBalances> {
        let snapshot = self.token_snapshot()?;
        self.contract_balances_per_chain
            .get_or_compute(&snapshot, account.to_string(), || {
                select_contract_balances_per_chain(&snapshot, &self.merger, account)
            })
    }

    /// Merged balances of every account on every chain.
    pub fn global_all_accounts(&self) -> Result<AccountBalances> {
        let snapshot = self.token_snapshot()?;
        self.all_token_balances.get_or_compute(&snapshot, (), || {
            select_all_token_balances(&snapshot, &self.merger)
        })
    }

    /// Whether the raw data holds any token entry at all.
    pub fn has_any_balance(&self) -> Result<bool> {
        let snapshot = self.token_snapshot()?;
        self.has_any_balance
            .get_or_compute(&snapshot, (), || Ok(select_has_any_balance(&snapshot)))
    }

    /// Raw record of a single token, unmerged.
    pub fn single_token_balance(
        &self,
        account: &str,
        chain: &str,
        token: &str,
    ) -> Result<BalanceMap> {
        let snapshot = self.token_snapshot()?;
        self.single_token_balance.get_or_compute(
            &snapshot,
            (account.to_string(), chain.to_string(), token.to_string()),
            || {
                Ok(select_single_token_balance(
                    &snapshot, account, chain, token,
                ))
            },
        )
    }

    /// Whether `account` holds a non-zero balance on a counted network.
    pub fn address_has_non_zero_balance(&self, account: &str) -> Result<bool> {
        let source = (self.token_snapshot()?, self.settings()?);
        self.address_has_balances
            .get_or_compute(&source, account.to_string(), || {
                let (snapshot, settings) = &source;
                let networks = ExtendedNetworks {
                    inner: self.networks.as_ref(),
                    extra: &settings.extra_test_networks,
                };
                Ok(select_address_has_token_balances(
                    snapshot,
                    account,
                    settings.show_fiat_in_testnets,
                    &networks,
                ))
            })
    }

    /// Fiat total of a wallet group.
    pub fn wallet_group_fiat_total(&self, group_id: &str) -> Result<AggregateTotal> {
        let source = self.wallet_source()?;
        self.group_totals
            .get_or_compute(&source, group_id.to_string(), || {
                let (wallets, settings) = &source;
                let display = DisplayContext::from_settings(settings)?;
                select_wallet_group_fiat_total(
                    wallets.group(group_id),
                    &self.merger.baseline(),
                    &display,
                )
            })
    }

    /// Fiat total of a wallet; `formatted` is `None` while it is loading.
    pub fn wallet_total_fiat(&self, wallet_id: &str) -> Result<AggregateTotal> {
        let source = self.wallet_source()?;
        self.wallet_totals
            .get_or_compute(&source, wallet_id.to_string(), || {
                let (wallets, settings) = &source;
                let display = DisplayContext::from_settings(settings)?;
                select_wallet_total_fiat(
                    wallets.wallet(wallet_id),
                    &self.merger.baseline(),
                    &display,
                )
            })
    }

    /// Formatted wallet total plus a formatted total for each of its groups.
    pub fn wallet_balances(&self, wallet_id: &str) -> Result<WalletBalances> {
        let source = self.wallet_source()?;
        self.wallet_summaries
            .get_or_compute(&source, wallet_id.to_string(), || {
                let (wallets, settings) = &source;
                let display = DisplayContext::from_settings(settings)?;
                compute_wallet_balances(wallets.wallet(wallet_id), &self.merger, &display)
            })
    }

    /// Combined counters of every selector cache.
    pub fn cache_stats(&self) -> MemoStats {
        self.cache_stats_by_selector()
            .into_values()
            .fold(MemoStats::default(), |acc, stats| acc + stats)
    }

    pub fn cache_stats_by_selector(&self) -> HashMap<&'static str, MemoStats> {
        HashMap::from([
            ("contract_balances", self.contract_balances.stats()),
            (
                "contract_balances_per_chain",
                self.contract_balances_per_chain.stats(),
            ),
            ("all_token_balances", self.all_token_balances.stats()),
            ("has_any_balance", self.has_any_balance.stats()),
            ("single_token_balance", self.single_token_balance.stats()),
            ("address_has_balances", self.address_has_balances.stats()),
            ("wallet_totals", self.wallet_totals.stats()),
            ("group_totals", self.group_totals.stats()),
            ("wallet_summaries", self.wallet_summaries.stats()),
        ])
    }

    /// Drops every cached selector result.
    pub fn clear_caches(&self) -> Result<()> {
        self.contract_balances.clear()?;
        self.contract_balances_per_chain.clear()?;
        self.all_token_balances.clear()?;
        self.has_any_balance.clear()?;
        self.single_token_balance.clear()?;
        self.address_has_balances.clear()?;
        self.wallet_totals.clear()?;
        self.group_totals.clear()?;
        self.wallet_summaries.clear()
    }
}

/// The configured classifier plus chain ids listed in the settings.
struct ExtendedNetworks<'a> {
    inner: &'a dyn NetworkClassifier,
    extra: &'a [String],
}

impl NetworkClassifier for ExtendedNetworks<'_> {
    fn is_test_network(&self, chain_id: &str) -> bool {
        self.inner.is_test_network(chain_id)
            || self
                .extra
                .iter()
                .any(|extra| extra.eq_ignore_ascii_case(chain_id))
    }
}
