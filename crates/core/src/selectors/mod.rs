//! Selectors module - derived balance aggregates and their memoization.

mod aggregation_selectors;
mod balance_selectors;
mod memo_cache;
mod selectors_model;
mod selectors_traits;

pub use aggregation_selectors::AggregationSelectors;
pub use balance_selectors::*;
pub use memo_cache::{MemoCache, MemoStats, Snapshot};
pub use selectors_model::*;
pub use selectors_traits::{KnownTestNetworks, NetworkClassifier, DEFAULT_TEST_NETWORKS};

#[cfg(test)]
mod aggregation_selectors_tests;
