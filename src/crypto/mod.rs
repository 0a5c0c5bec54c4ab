//! Cryptographic utilities for ledger identities
//!
//! This module provides:
//! - SHA-256 and HASH160 hashing
//! - secp256k1 key management and address derivation

pub mod hash;
pub mod keys;

pub use hash::{hash160, sha256, sha256_hex};
pub use keys::{public_key_from_hex, public_key_to_address, KeyError, KeyPair};
