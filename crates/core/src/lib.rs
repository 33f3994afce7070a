//! Multichain Balances Core - balance merging, aggregation and fiat display.
//!
//! Raw per-account, per-chain token balances are merged with a zero-valued
//! baseline catalog, aggregated per chain, account and wallet group, and
//! formatted for display. The state store, rate sources and UI are external
//! collaborators; this crate only holds the pure pipeline and its caches.

pub mod amounts;
pub mod balances;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod selectors;
pub mod settings;
pub mod summary;

pub use amounts::Amount;
pub use balances::{BalanceMap, BalanceMerger, BalanceRecord, TokenBalancesState};
pub use selectors::{AggregateTotal, AggregationSelectors};
pub use settings::BalanceSettings;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
