//! Token-Ledger: an ERC-20 style fungible token ledger in Rust
//!
//! This crate provides:
//! - A single-token ledger of balances and allowances with fixed supply
//! - Transfer, approve and delegated transfer with checked arithmetic
//! - Transfer/Approval notifications through a pluggable event sink
//! - JSON genesis configuration with 18-decimal unit scaling
//! - An async, serialized handle for concurrent hosts
//! - secp256k1 wallets whose HASH160 addresses act on the ledger
//!
//! # Example
//!
//! ```rust
//! use token_ledger::token::{Call, GenesisConfig, TokenError};
//! use token_ledger::wallet::dev_wallets;
//!
//! let wallets = dev_wallets(3).unwrap();
//! let (deployer, receiver, exchange) = (&wallets[0], &wallets[1], &wallets[2]);
//!
//! // Deploy with one million whole tokens credited to the deployer
//! let genesis = GenesisConfig::new("Dapp University", "DAPP", 1_000_000, deployer.address());
//! let mut token = genesis.build().unwrap();
//!
//! // Let the exchange spend on the deployer's behalf
//! let amount = 100 * 10u128.pow(18);
//! deployer
//!     .call(&mut token, Call::Approve { spender: exchange.address(), value: amount })
//!     .unwrap();
//! exchange
//!     .call(
//!         &mut token,
//!         Call::TransferFrom { from: deployer.address(), to: receiver.address(), value: amount },
//!     )
//!     .unwrap();
//!
//! assert_eq!(token.balance_of(&receiver.address()), amount);
//! assert_eq!(token.allowance(&deployer.address(), &exchange.address()), 0);
//!
//! // Nothing may be sent to the zero address
//! let err = token.transfer(deployer.address(), Default::default(), 1).unwrap_err();
//! assert_eq!(err, TokenError::InvalidRecipient);
//! ```

pub mod crypto;
pub mod token;
pub mod wallet;

// Re-export commonly used types
pub use crypto::KeyPair;
pub use token::{
    Address, Amount, Approval, Call, EventLog, EventSink, GenesisConfig, SharedLedger,
    TokenError, TokenEvent, TokenLedger, TokenMetadata, Transfer, DECIMALS,
};
pub use wallet::Wallet;
