//! Summary module - account and wallet balance summaries for display.

mod account_balance;
mod wallet_balances;

pub use account_balance::{
    account_balance_summary, AccountBalanceRequest, AccountBalanceSummary, AccountsByChainId,
    NativeAccountBalance,
};
pub use wallet_balances::{compute_wallet_balances, WalletBalances};
