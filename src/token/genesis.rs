//! Genesis configuration
//!
//! Describes how a ledger is deployed: its name, symbol, how many whole
//! tokens exist and who receives them. The supply is given in whole tokens
//! and scaled by `10^DECIMALS` when the ledger is built.
//!
//! ```json
//! {
//!   "name": "Dapp University",
//!   "symbol": "DAPP",
//!   "initial_supply": 1000000,
//!   "holder": "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::token::address::Address;
use crate::token::amount::{to_base_units, Amount, UnitsError, DECIMALS};
use crate::token::error::TokenError;
use crate::token::events::{EventLog, EventSink};
use crate::token::ledger::TokenLedger;

/// Genesis errors
#[derive(Error, Debug)]
pub enum GenesisError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid supply: {0}")]
    UnitsError(#[from] UnitsError),
    #[error("Invalid token: {0}")]
    TokenError(#[from] TokenError),
}

/// Deployment parameters of a ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    pub name: String,
    pub symbol: String,
    /// Whole tokens credited to `holder`
    pub initial_supply: u128,
    pub holder: Address,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            name: "Token".to_string(),
            symbol: "TKN".to_string(),
            initial_supply: 1_000_000,
            holder: Address::ZERO,
        }
    }
}

impl GenesisConfig {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        initial_supply: u128,
        holder: Address,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            initial_supply,
            holder,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, GenesisError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, GenesisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GenesisError> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Write the config as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), GenesisError> {
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Total supply in base units
    pub fn total_supply(&self) -> Result<Amount, GenesisError> {
        Ok(to_base_units(self.initial_supply, DECIMALS)?)
    }

    /// Deploy a ledger keeping its most recent events in an [`EventLog`]
    pub fn build(&self) -> Result<TokenLedger, GenesisError> {
        self.build_with_sink(EventLog::recent())
    }

    /// Deploy a ledger delivering its events to `sink`
    pub fn build_with_sink<S: EventSink>(&self, sink: S) -> Result<TokenLedger<S>, GenesisError> {
        let total_supply = self.total_supply()?;
        Ok(TokenLedger::with_sink(
            self.name.clone(),
            self.symbol.clone(),
            total_supply,
            self.holder,
            sink,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::events::LogSink;
    use tempfile::tempdir;

    const ONE: Amount = 1_000_000_000_000_000_000;

    fn deployer() -> Address {
        Address::from_low_u8(0xd1)
    }

    #[test]
    fn test_build_scales_supply() {
        let config = GenesisConfig::new("Dapp University", "DAPP", 1_000_000, deployer());
        let ledger = config.build().unwrap();

        assert_eq!(ledger.name(), "Dapp University");
        assert_eq!(ledger.symbol(), "DAPP");
        assert_eq!(ledger.decimals(), 18);
        assert_eq!(ledger.total_supply(), 1_000_000 * ONE);
        assert_eq!(ledger.balance_of(&deployer()), 1_000_000 * ONE);
    }

    #[test]
    fn test_default_needs_a_holder() {
        let result = GenesisConfig::default().build();
        assert!(matches!(
            result,
            Err(GenesisError::TokenError(TokenError::InvalidHolder))
        ));

        let config = GenesisConfig {
            holder: deployer(),
            ..GenesisConfig::default()
        };
        assert!(config.build_with_sink(LogSink).is_ok());
    }

    #[test]
    fn test_supply_overflow() {
        let config = GenesisConfig::new("Big", "BIG", u128::MAX / 10, deployer());
        assert!(matches!(
            config.build(),
            Err(GenesisError::UnitsError(UnitsError::Overflow))
        ));
    }

    #[test]
    fn test_from_json() {
        let config = GenesisConfig::from_json(
            r#"{
                "name": "Dapp University",
                "symbol": "DAPP",
                "initial_supply": 1000000,
                "holder": "0x00000000000000000000000000000000000000d1"
            }"#,
        )
        .unwrap();

        assert_eq!(
            config,
            GenesisConfig::new("Dapp University", "DAPP", 1_000_000, deployer())
        );
        assert!(matches!(
            GenesisConfig::from_json(r#"{"name": "x"}"#),
            Err(GenesisError::SerializationError(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("genesis.json");

        let config = GenesisConfig::new("Dapp University", "DAPP", 42, deployer());
        config.save(&path).unwrap();

        let loaded = GenesisConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.to_json().unwrap(), config.to_json().unwrap());
    }

    #[test]
    fn test_save_writes_complete_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("genesis.json");

        let config = GenesisConfig::new("Dapp University", "DAPP", 1_000_000, deployer());
        config.save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, config.to_json().unwrap());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = GenesisConfig::from_file(dir.path().join("absent.json"));
        assert!(matches!(result, Err(GenesisError::IoError(_))));
    }
}
