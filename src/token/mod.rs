//! ERC-20 style fungible token ledger
//!
//! Provides a single fungible token with:
//! - Balances per address
//! - Allowances for delegated transfers
//! - Transfer, approve and transfer-from operations
//! - Transfer and Approval notifications delivered through an [`EventSink`]
//!
//! # Example
//!
//! ```rust
//! use token_ledger::token::{parse_units, Address, TokenLedger, DECIMALS};
//!
//! let deployer = Address::from_low_u8(1);
//! let receiver = Address::from_low_u8(2);
//! let supply = parse_units("1000000", DECIMALS).unwrap();
//!
//! let mut ledger = TokenLedger::new("Dapp University", "DAPP", supply, deployer).unwrap();
//!
//! let hundred = parse_units("100", DECIMALS).unwrap();
//! ledger.transfer(deployer, receiver, hundred).unwrap();
//!
//! assert_eq!(ledger.balance_of(&receiver), hundred);
//! assert_eq!(ledger.sink().transfers().count(), 1);
//! ```

pub mod address;
pub mod amount;
pub mod call;
pub mod error;
pub mod events;
pub mod genesis;
pub mod ledger;
pub mod shared;

pub use address::{Address, AddressError};
pub use amount::{format_units, parse_units, to_base_units, Amount, UnitsError, DECIMALS};
pub use call::Call;
pub use error::TokenError;
pub use events::{
    Approval, EventBroadcaster, EventLog, EventRecord, EventSink, LogSink, TokenEvent, Transfer,
    HISTORY_CAPACITY,
};
pub use genesis::{GenesisConfig, GenesisError};
pub use ledger::{TokenLedger, TokenMetadata};
pub use shared::SharedLedger;
