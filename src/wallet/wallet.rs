//! Wallet implementation for ledger accounts
//!
//! A wallet owns a key pair and acts on a ledger as the account derived
//! from it.

use crate::crypto::{KeyError, KeyPair};
use crate::token::{Address, Amount, Call, EventSink, TokenError, TokenEvent, TokenLedger};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Wallet-related errors
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Crypto error: {0}")]
    CryptoError(#[from] KeyError),
}

/// Serializable wallet data for persistence
#[derive(Debug, Serialize, Deserialize)]
struct WalletData {
    private_key_hex: String,
    address: Address,
    label: Option<String>,
}

/// A ledger wallet: a key pair and the account it controls
#[derive(Clone)]
pub struct Wallet {
    key_pair: KeyPair,
    /// Optional label for the wallet
    pub label: Option<String>,
}

impl Wallet {
    /// Create a new wallet with a fresh key pair
    pub fn new() -> Self {
        Self {
            key_pair: KeyPair::generate(),
            label: None,
        }
    }

    /// Create a wallet with a label
    pub fn with_label(label: &str) -> Self {
        Self {
            key_pair: KeyPair::generate(),
            label: Some(label.to_string()),
        }
    }

    /// Import a wallet from a private key
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, WalletError> {
        let key_pair = KeyPair::from_private_key_hex(private_key_hex)?;
        Ok(Self {
            key_pair,
            label: None,
        })
    }

    /// Derive a wallet deterministically from a seed
    pub fn from_seed(seed: &[u8]) -> Result<Self, WalletError> {
        Ok(Self {
            key_pair: KeyPair::from_seed(seed)?,
            label: None,
        })
    }

    /// Get the wallet's address
    pub fn address(&self) -> Address {
        self.key_pair.address()
    }

    /// Get the wallet's public key (hex)
    pub fn public_key(&self) -> String {
        self.key_pair.public_key_hex()
    }

    /// Get the wallet's private key (hex)
    /// WARNING: Keep this secret!
    pub fn private_key(&self) -> String {
        self.key_pair.private_key_hex()
    }

    /// This wallet's balance on `ledger`
    pub fn balance<S: EventSink>(&self, ledger: &TokenLedger<S>) -> Amount {
        ledger.balance_of(&self.address())
    }

    /// Execute `call` on `ledger` as this wallet's account
    pub fn call<S: EventSink>(
        &self,
        ledger: &mut TokenLedger<S>,
        call: Call,
    ) -> Result<TokenEvent, TokenError> {
        ledger.dispatch(self.address(), call)
    }

    /// Save wallet to file
    pub fn save(&self, path: &Path) -> Result<(), WalletError> {
        let data = WalletData {
            private_key_hex: self.private_key(),
            address: self.address(),
            label: self.label.clone(),
        };

        let json = serde_json::to_string_pretty(&data)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load wallet from file
    pub fn load(path: &Path) -> Result<Self, WalletError> {
        let json = fs::read_to_string(path)?;
        let data: WalletData = serde_json::from_str(&json)?;

        let mut wallet = Self::from_private_key(&data.private_key_hex)?;
        wallet.label = data.label;
        Ok(wallet)
    }

    /// Export wallet info (without private key)
    pub fn export_public_info(&self) -> WalletInfo {
        WalletInfo {
            address: self.address(),
            public_key: self.public_key(),
            label: self.label.clone(),
        }
    }
}

impl Default for Wallet {
    fn default() -> Self {
        Self::new()
    }
}

/// Public wallet information (safe to share)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletInfo {
    pub address: Address,
    pub public_key: String,
    pub label: Option<String>,
}

/// `count` deterministic wallets labelled `dev-0`, `dev-1`, ...
///
/// The same index always yields the same address, which makes them suitable
/// as fixed test accounts.
pub fn dev_wallets(count: usize) -> Result<Vec<Wallet>, WalletError> {
    (0..count)
        .map(|i| -> Result<Wallet, WalletError> {
            let label = format!("dev-{}", i);
            let mut wallet = Wallet::from_seed(format!("token-ledger/{}", label).as_bytes())?;
            wallet.label = Some(label);
            Ok(wallet)
        })
        .collect()
}
