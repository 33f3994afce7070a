//! Balances module - balance models, the baseline catalog and the merger.

mod balance_merger;
mod balances_model;
mod baseline;

pub use balance_merger::{merge_with_default_balances, BalanceMerger};
pub use balances_model::*;
pub use baseline::{
    default_balances, face_value_total, BaselineProvider, DefaultBaseline, BASELINE_SYMBOLS,
};
