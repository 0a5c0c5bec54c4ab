use crate::token::amount::Amount;
use thiserror::Error;

/// Token ledger errors
///
/// Every error rejects the whole operation: the ledger is left exactly as it
/// was before the call and no event is emitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid recipient: cannot transfer to the zero address")]
    InvalidRecipient,
    #[error("Invalid spender: cannot approve the zero address")]
    InvalidSpender,
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },
    #[error("Arithmetic overflow")]
    Overflow,
    #[error("Invalid name: must not be empty")]
    InvalidName,
    #[error("Invalid symbol: must not be empty")]
    InvalidSymbol,
    #[error("Invalid holder: initial supply cannot be credited to the zero address")]
    InvalidHolder,
}
