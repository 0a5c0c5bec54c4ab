//! Caller-bound ledger calls
//!
//! A [`Call`] names a mutating operation without its caller. The host binds
//! the caller when it hands the call to [`TokenLedger::dispatch`], the way an
//! execution environment supplies the message sender.
//!
//! [`TokenLedger::dispatch`]: crate::token::TokenLedger::dispatch

use crate::token::address::Address;
use crate::token::amount::Amount;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    /// Move `value` from the caller to `to`
    Transfer { to: Address, value: Amount },
    /// Let `spender` move up to `value` out of the caller's balance
    Approve { spender: Address, value: Amount },
    /// Move `value` from `from` to `to`, spending the caller's allowance
    TransferFrom {
        from: Address,
        to: Address,
        value: Amount,
    },
}

impl Call {
    /// Operation name, as used in logs
    pub fn method(&self) -> &'static str {
        match self {
            Call::Transfer { .. } => "transfer",
            Call::Approve { .. } => "approve",
            Call::TransferFrom { .. } => "transfer_from",
        }
    }

    pub fn value(&self) -> Amount {
        match self {
            Call::Transfer { value, .. }
            | Call::Approve { value, .. }
            | Call::TransferFrom { value, .. } => *value,
        }
    }
}
