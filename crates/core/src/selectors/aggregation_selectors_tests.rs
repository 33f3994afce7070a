//! Unit tests for the aggregation selectors.

use super::*;
use crate::amounts::Amount;
use crate::balances::{
    default_balances, AccountBalances, BalanceMap, BalanceMerger, BalanceRecord,
    BaselineProvider, ChainBalances, TokenBalancesState, BASELINE_SYMBOLS,
};
use crate::settings::BalanceSettings;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::Arc;

const ALICE: &str = "0xabc";
const BOB: &str = "0xdef";
const CAROL: &str = "0x123";
const MAINNET: &str = "0x1";
const SEPOLIA: &str = "0xaa36a7";
const POLYGON: &str = "0x89";
const TWO_AND_A_HALF_ETH: u128 = 2_500_000_000_000_000_000;

// ============================================================================
// Fixtures
// ============================================================================

fn balances(entries: &[(&str, u128)]) -> BalanceMap {
    entries
        .iter()
        .map(|(symbol, amount)| {
            (
                symbol.to_string(),
                BalanceRecord::new(Amount::from(*amount), *symbol),
            )
        })
        .collect()
}

fn chains(entries: Vec<(&str, BalanceMap)>) -> ChainBalances {
    entries
        .into_iter()
        .map(|(chain, map)| (chain.to_string(), map))
        .collect()
}

fn sample_state() -> TokenBalancesState {
    let mut accounts = AccountBalances::new();
    accounts.insert(
        ALICE.to_string(),
        chains(vec![
            (MAINNET, balances(&[("ETH", TWO_AND_A_HALF_ETH), ("SHIB", 100)])),
            (SEPOLIA, balances(&[("ETH", 1)])),
        ]),
    );
    accounts.insert(BOB.to_string(), chains(vec![(MAINNET, BalanceMap::new())]));
    accounts.insert(
        CAROL.to_string(),
        chains(vec![
            (SEPOLIA, balances(&[("USDC", 5)])),
            (POLYGON, balances(&[("USDC", 0)])),
        ]),
    );
    TokenBalancesState::new(accounts)
}

fn selectors_with(settings: BalanceSettings) -> AggregationSelectors {
    let selectors = AggregationSelectors::new(
        BalanceMerger::default(),
        Arc::new(KnownTestNetworks::default()),
        settings,
    )
    .unwrap();
    selectors
        .set_token_balances(Arc::new(sample_state()))
        .unwrap();
    selectors
}

fn selectors() -> AggregationSelectors {
    selectors_with(BalanceSettings::default())
}

fn wallet_state() -> WalletBalancesState {
    let mut loaded_groups = HashMap::new();
    loaded_groups.insert(
        "group-1".to_string(),
        GroupBalance {
            group_id: "group-1".to_string(),
            total_balance_in_user_currency: Some(dec!(1000)),
        },
    );
    loaded_groups.insert(
        "group-2".to_string(),
        GroupBalance {
            group_id: "group-2".to_string(),
            total_balance_in_user_currency: None,
        },
    );

    WalletBalancesState::new(vec![
        WalletBalance {
            wallet_id: "loaded".to_string(),
            total_balance_in_user_currency: Some(dec!(1234.5)),
            groups: loaded_groups,
        },
        WalletBalance {
            wallet_id: "loading".to_string(),
            total_balance_in_user_currency: None,
            groups: HashMap::new(),
        },
        WalletBalance {
            wallet_id: "dust".to_string(),
            total_balance_in_user_currency: Some(dec!(0.004)),
            groups: HashMap::new(),
        },
        WalletBalance {
            wallet_id: "empty".to_string(),
            total_balance_in_user_currency: Some(Decimal::ZERO),
            groups: HashMap::new(),
        },
    ])
}

// ============================================================================
// Merged Balance Selectors
// ============================================================================

#[test]
fn test_per_account_per_chain_merges_with_baseline() {
    let merged = selectors().per_account_per_chain(ALICE, MAINNET).unwrap();

    assert_eq!(merged.len(), 11);
    assert_eq!(merged["ETH"].amount, Amount::from(TWO_AND_A_HALF_ETH));
    assert_eq!(merged["SHIB"].amount, Amount::from(100u64));
    assert_eq!(merged["USDT"].amount, Amount::ZERO);
}

#[test]
fn test_per_account_per_chain_missing_data_yields_baseline() {
    let selectors = selectors();
    assert_eq!(
        selectors.per_account_per_chain("0xnobody", MAINNET).unwrap(),
        default_balances()
    );
    assert_eq!(
        selectors.per_account_per_chain(ALICE, POLYGON).unwrap(),
        default_balances()
    );
}

#[test]
fn test_per_account_all_chains() {
    let selectors = selectors();
    let per_chain = selectors.per_account_all_chains(ALICE).unwrap();

    assert_eq!(per_chain.len(), 2);
    assert_eq!(per_chain[SEPOLIA]["ETH"].amount, Amount::from(1u64));
    assert_eq!(per_chain[SEPOLIA].len(), 10);
    assert_eq!(
        per_chain[MAINNET],
        selectors.per_account_per_chain(ALICE, MAINNET).unwrap()
    );

    assert!(selectors.per_account_all_chains("0xnobody").unwrap().is_empty());
}

#[test]
fn test_global_all_accounts_nests_every_account() {
    let global = selectors().global_all_accounts().unwrap();

    assert_eq!(global.len(), 3);
    assert_eq!(global[BOB][MAINNET], default_balances());
    assert_eq!(global[CAROL][SEPOLIA]["USDC"].amount, Amount::from(5u64));
    for symbol in BASELINE_SYMBOLS {
        assert!(global[CAROL][POLYGON].contains_key(symbol));
    }
}

// ============================================================================
// Raw Data Selectors
// ============================================================================

#[test]
fn test_has_any_balance_reads_raw_data() {
    assert!(selectors().has_any_balance().unwrap());

    let selectors = selectors();
    let mut only_empty = AccountBalances::new();
    only_empty.insert(BOB.to_string(), chains(vec![(MAINNET, BalanceMap::new())]));
    selectors
        .set_token_balances(Arc::new(TokenBalancesState::new(only_empty)))
        .unwrap();
    assert!(!selectors.has_any_balance().unwrap());

    selectors
        .set_token_balances(Arc::new(TokenBalancesState::default()))
        .unwrap();
    assert!(!selectors.has_any_balance().unwrap());
    // The merged view is never empty, which is why the raw data is used.
    assert_eq!(
        selectors.per_account_per_chain(BOB, MAINNET).unwrap().len(),
        10
    );
}

#[test]
fn test_has_any_balance_counts_zero_entries() {
    let selectors = selectors();
    let mut accounts = AccountBalances::new();
    accounts.insert(
        CAROL.to_string(),
        chains(vec![(POLYGON, balances(&[("USDC", 0)]))]),
    );
    selectors
        .set_token_balances(Arc::new(TokenBalancesState::new(accounts)))
        .unwrap();
    assert!(selectors.has_any_balance().unwrap());
}

#[test]
fn test_single_token_balance_is_unmerged() {
    let selectors = selectors();

    let shib = selectors.single_token_balance(ALICE, MAINNET, "SHIB").unwrap();
    assert_eq!(shib, balances(&[("SHIB", 100)]));

    // USDC is in the baseline, but not in Alice's raw data.
    assert!(selectors
        .single_token_balance(ALICE, MAINNET, "USDC")
        .unwrap()
        .is_empty());
    assert!(selectors
        .single_token_balance("0xnobody", MAINNET, "ETH")
        .unwrap()
        .is_empty());
}

#[test]
fn test_address_has_non_zero_balance() {
    let selectors = selectors();
    assert!(selectors.address_has_non_zero_balance(ALICE).unwrap());
    assert!(!selectors.address_has_non_zero_balance(BOB).unwrap());
    assert!(!selectors.address_has_non_zero_balance("0xnobody").unwrap());
    assert!(!selectors.address_has_non_zero_balance("").unwrap());
}

#[test]
fn test_address_has_non_zero_balance_skips_test_networks() {
    let selectors = selectors();
    // Carol only holds a non-zero balance on Sepolia.
    assert!(!selectors.address_has_non_zero_balance(CAROL).unwrap());

    selectors
        .update_settings(BalanceSettings {
            show_fiat_in_testnets: true,
            ..BalanceSettings::default()
        })
        .unwrap();
    assert!(selectors.address_has_non_zero_balance(CAROL).unwrap());
}

#[test]
fn test_address_has_non_zero_balance_honors_extra_test_networks() {
    let selectors = selectors_with(BalanceSettings {
        extra_test_networks: vec![MAINNET.to_string()],
        ..BalanceSettings::default()
    });
    // Alice's only remaining chain is Sepolia, also a test network.
    assert!(!selectors.address_has_non_zero_balance(ALICE).unwrap());
}

#[test]
fn test_custom_network_classifier() {
    let selectors = AggregationSelectors::new(
        BalanceMerger::default(),
        Arc::new(|chain_id: &str| chain_id == MAINNET),
        BalanceSettings::default(),
    )
    .unwrap();
    selectors
        .set_token_balances(Arc::new(sample_state()))
        .unwrap();

    // Mainnet is now the test network and Sepolia counts.
    assert!(selectors.address_has_non_zero_balance(ALICE).unwrap());
    assert!(selectors.address_has_non_zero_balance(CAROL).unwrap());
}

// ============================================================================
// Fiat Totals
// ============================================================================

#[test]
fn test_wallet_total_fiat_formats_loaded_total() {
    let selectors = selectors();
    selectors
        .set_wallet_balances(Arc::new(wallet_state()))
        .unwrap();

    let total = selectors.wallet_total_fiat("loaded").unwrap();
    assert_eq!(total.raw, dec!(1234.5));
    assert_eq!(total.formatted.as_deref(), Some("$1,234.50"));
    assert!(!total.is_loading());
}

#[test]
fn test_wallet_total_fiat_loading_has_no_display() {
    let selectors = selectors();
    selectors
        .set_wallet_balances(Arc::new(wallet_state()))
        .unwrap();

    let loading = selectors.wallet_total_fiat("loading").unwrap();
    assert_eq!(loading.formatted, None);
    assert_eq!(loading.raw, Decimal::ZERO);
    assert!(loading.is_loading());

    let unknown = selectors.wallet_total_fiat("missing-wallet").unwrap();
    assert!(unknown.is_loading());
}

#[test]
fn test_wallet_total_fiat_threshold_forms() {
    let selectors = selectors();
    selectors
        .set_wallet_balances(Arc::new(wallet_state()))
        .unwrap();

    assert_eq!(
        selectors.wallet_total_fiat("dust").unwrap().formatted.as_deref(),
        Some("<$0.01")
    );
    assert_eq!(
        selectors.wallet_total_fiat("empty").unwrap().formatted.as_deref(),
        Some("$0.00")
    );
}

#[test]
fn test_wallet_group_fiat_total() {
    let selectors = selectors();
    selectors
        .set_wallet_balances(Arc::new(wallet_state()))
        .unwrap();

    let loaded = selectors.wallet_group_fiat_total("group-1").unwrap();
    assert_eq!(loaded.raw, dec!(1000));
    assert_eq!(loaded.formatted.as_deref(), Some("$1,000.00"));

    // An unpriced group still formats, as zero.
    let unpriced = selectors.wallet_group_fiat_total("group-2").unwrap();
    assert_eq!(unpriced.formatted.as_deref(), Some("$0.00"));

    let unknown = selectors.wallet_group_fiat_total("no-such-group").unwrap();
    assert_eq!(unknown.formatted.as_deref(), Some("$0.00"));
}

#[test]
fn test_shared_group_id_resolves_to_lowest_wallet_id() {
    let shared = |total| {
        HashMap::from([(
            "shared".to_string(),
            GroupBalance {
                group_id: "shared".to_string(),
                total_balance_in_user_currency: Some(total),
            },
        )])
    };
    let wallets = WalletBalancesState::new(vec![
        WalletBalance {
            wallet_id: "wallet-b".to_string(),
            total_balance_in_user_currency: Some(dec!(1)),
            groups: shared(dec!(1)),
        },
        WalletBalance {
            wallet_id: "wallet-a".to_string(),
            total_balance_in_user_currency: Some(dec!(2)),
            groups: shared(dec!(2)),
        },
        WalletBalance {
            wallet_id: "wallet-c".to_string(),
            total_balance_in_user_currency: Some(dec!(3)),
            groups: shared(dec!(3)),
        },
    ]);

    for _ in 0..5 {
        let group = wallets.group("shared").unwrap();
        assert_eq!(group.total_balance_in_user_currency, Some(dec!(2)));
    }

    let selectors = selectors();
    selectors.set_wallet_balances(Arc::new(wallets)).unwrap();
    assert_eq!(
        selectors
            .wallet_group_fiat_total("shared")
            .unwrap()
            .formatted
            .as_deref(),
        Some("$2.00")
    );
}

#[test]
fn test_fiat_total_overflow_is_an_error() {
    struct OneBaseline;
    impl BaselineProvider for OneBaseline {
        fn get_baseline(&self) -> BalanceMap {
            let mut catalog = default_balances();
            catalog.insert(
                "ETH".to_string(),
                BalanceRecord::new(Amount::from(1u64), "ETH"),
            );
            catalog
        }
    }

    let baseline = OneBaseline.get_baseline();
    let display = DisplayContext::from_settings(&BalanceSettings::default()).unwrap();
    let wallet = WalletBalance {
        wallet_id: "whale".to_string(),
        total_balance_in_user_currency: Some(Decimal::MAX),
        groups: HashMap::new(),
    };
    let group = GroupBalance {
        group_id: "whale-group".to_string(),
        total_balance_in_user_currency: Some(Decimal::MAX),
    };

    let err = select_wallet_total_fiat(Some(&wallet), &baseline, &display).unwrap_err();
    assert!(matches!(
        err,
        crate::Error::Amount(crate::amounts::AmountError::OutOfDecimalRange { .. })
    ));
    let err = select_wallet_group_fiat_total(Some(&group), &baseline, &display).unwrap_err();
    assert!(matches!(err, crate::Error::Amount(_)));

    // The zero baseline leaves the maximum representable total intact.
    let total =
        select_wallet_total_fiat(Some(&wallet), &default_balances(), &display).unwrap();
    assert_eq!(total.raw, Decimal::MAX);
}

#[test]
fn test_fiat_totals_follow_settings() {
    let selectors = selectors();
    selectors
        .set_wallet_balances(Arc::new(wallet_state()))
        .unwrap();
    assert_eq!(
        selectors.wallet_total_fiat("loaded").unwrap().formatted.as_deref(),
        Some("$1,234.50")
    );

    selectors
        .update_settings(BalanceSettings {
            currency: "eur".to_string(),
            locale: "de-DE".to_string(),
            ..BalanceSettings::default()
        })
        .unwrap();
    assert_eq!(
        selectors.wallet_total_fiat("loaded").unwrap().formatted.as_deref(),
        Some("1.234,50\u{a0}€")
    );
}

#[test]
fn test_invalid_settings_are_rejected_and_kept() {
    let selectors = selectors();
    let result = selectors.update_settings(BalanceSettings {
        currency: "not-a-currency".to_string(),
        ..BalanceSettings::default()
    });
    assert!(result.is_err());
    assert_eq!(selectors.settings().unwrap().currency, "USD");
}

#[test]
fn test_non_zero_baseline_is_added_to_fiat_totals() {
    struct TenBaseline;
    impl BaselineProvider for TenBaseline {
        fn get_baseline(&self) -> BalanceMap {
            let mut catalog = default_balances();
            catalog.insert(
                "USDC".to_string(),
                BalanceRecord::new(Amount::from(10u64), "USDC"),
            );
            catalog
        }
    }

    let selectors = AggregationSelectors::new(
        BalanceMerger::new(Arc::new(TenBaseline)),
        Arc::new(KnownTestNetworks::default()),
        BalanceSettings::default(),
    )
    .unwrap();
    selectors
        .set_wallet_balances(Arc::new(wallet_state()))
        .unwrap();

    assert_eq!(selectors.wallet_total_fiat("loaded").unwrap().raw, dec!(1244.5));
    // Loading stays loading regardless of the baseline contribution.
    let loading = selectors.wallet_total_fiat("loading").unwrap();
    assert_eq!(loading.raw, dec!(10));
    assert_eq!(loading.formatted, None);
}

#[test]
fn test_wallet_balances_summary() {
    let selectors = selectors();
    selectors
        .set_wallet_balances(Arc::new(wallet_state()))
        .unwrap();

    let summary = selectors.wallet_balances("loaded").unwrap();
    assert_eq!(
        summary.formatted_wallet_total_balance.as_deref(),
        Some("$1,234.50")
    );
    assert_eq!(summary.group_totals.len(), 2);
    assert_eq!(summary.group_totals["group-1"], "$1,000.00");
    assert_eq!(summary.group_totals["group-2"], "$0.00");

    let loading = selectors.wallet_balances("loading").unwrap();
    assert_eq!(loading.formatted_wallet_total_balance, None);
    assert!(loading.group_totals.is_empty());
}

// ============================================================================
// Memoization
// ============================================================================

#[test]
fn test_repeated_calls_hit_the_cache() {
    let selectors = selectors();
    let first = selectors.per_account_per_chain(ALICE, MAINNET).unwrap();
    let second = selectors.per_account_per_chain(ALICE, MAINNET).unwrap();
    assert_eq!(first, second);

    let stats = selectors.cache_stats_by_selector()["contract_balances"];
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn test_distinct_arguments_are_cached_separately() {
    let selectors = selectors();
    selectors.per_account_per_chain(ALICE, MAINNET).unwrap();
    selectors.per_account_per_chain(ALICE, SEPOLIA).unwrap();
    selectors.per_account_per_chain(ALICE, MAINNET).unwrap();

    let stats = selectors.cache_stats_by_selector()["contract_balances"];
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.entries, 2);
}

#[test]
fn test_new_snapshot_invalidates_cached_results() {
    let selectors = selectors();
    let before = selectors.per_account_per_chain(ALICE, MAINNET).unwrap();

    let mut state = sample_state();
    state
        .token_balances
        .get_mut(ALICE)
        .unwrap()
        .get_mut(MAINNET)
        .unwrap()
        .insert("ETH".to_string(), BalanceRecord::new(Amount::from(1u64), "ETH"));
    selectors.set_token_balances(Arc::new(state)).unwrap();

    let after = selectors.per_account_per_chain(ALICE, MAINNET).unwrap();
    assert_ne!(before, after);
    assert_eq!(after["ETH"].amount, Amount::from(1u64));
}

#[test]
fn test_memoized_results_match_pure_functions() {
    let selectors = selectors();
    let state = sample_state();
    let merger = BalanceMerger::default();

    // Twice, so the second comparison reads from the cache.
    for _ in 0..2 {
        assert_eq!(
            selectors.global_all_accounts().unwrap(),
            select_all_token_balances(&state, &merger).unwrap()
        );
        assert_eq!(
            selectors.per_account_all_chains(CAROL).unwrap(),
            select_contract_balances_per_chain(&state, &merger, CAROL).unwrap()
        );
        assert_eq!(
            selectors.has_any_balance().unwrap(),
            select_has_any_balance(&state)
        );
    }
    assert!(selectors.cache_stats().hits >= 3);
}

#[test]
fn test_clear_caches() {
    let selectors = selectors();
    selectors.global_all_accounts().unwrap();
    assert!(selectors.cache_stats().entries > 0);

    selectors.clear_caches().unwrap();
    assert_eq!(selectors.cache_stats().entries, 0);
}
