//! Wallet module for ledger identities

pub mod wallet;

pub use wallet::{dev_wallets, Wallet, WalletError, WalletInfo};
