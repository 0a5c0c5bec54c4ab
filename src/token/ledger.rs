//! ERC-20 style token ledger
//!
//! Balances and allowances for a single fungible token. The whole supply is
//! credited to one holder at construction and afterwards only moves through
//! [`TokenLedger::transfer`], [`TokenLedger::approve`] and
//! [`TokenLedger::transfer_from`].
//!
//! Every operation validates completely before touching state, so a
//! rejected call leaves balances, allowances and the event sink untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::token::address::Address;
use crate::token::amount::{format_units, Amount, DECIMALS};
use crate::token::call::Call;
use crate::token::error::TokenError;
use crate::token::events::{Approval, EventLog, EventSink, TokenEvent, Transfer};

/// Token metadata (immutable after creation)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenMetadata {
    /// Token name (e.g., "Dapp University")
    pub name: String,
    /// Token symbol (e.g., "DAPP")
    pub symbol: String,
    /// Decimal places, always [`DECIMALS`]
    pub decimals: u8,
    /// Total supply in base units (fixed at creation)
    pub total_supply: Amount,
    /// Timestamp when created
    pub created_at: DateTime<Utc>,
}

impl TokenMetadata {
    /// Create new token metadata with validation
    pub fn new(name: String, symbol: String, total_supply: Amount) -> Result<Self, TokenError> {
        if name.is_empty() {
            return Err(TokenError::InvalidName);
        }

        if symbol.is_empty() {
            return Err(TokenError::InvalidSymbol);
        }

        Ok(Self {
            name,
            symbol,
            decimals: DECIMALS,
            total_supply,
            created_at: Utc::now(),
        })
    }
}

/// A fungible token ledger
///
/// `S` receives a [`Transfer`] or [`Approval`] after each successful mutation.
#[derive(Debug)]
pub struct TokenLedger<S = EventLog> {
    metadata: TokenMetadata,
    /// Balances: address -> amount. Absent addresses hold 0.
    balances: HashMap<Address, Amount>,
    /// Allowances: owner -> (spender -> amount). Absent pairs are 0.
    allowances: HashMap<Address, HashMap<Address, Amount>>,
    sink: S,
}

impl TokenLedger {
    /// Create a ledger that keeps its most recent events in an [`EventLog`]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        total_supply: Amount,
        initial_holder: Address,
    ) -> Result<Self, TokenError> {
        Self::with_sink(name, symbol, total_supply, initial_holder, EventLog::recent())
    }
}

impl<S: EventSink> TokenLedger<S> {
    /// Create a ledger with all supply credited to `initial_holder`
    pub fn with_sink(
        name: impl Into<String>,
        symbol: impl Into<String>,
        total_supply: Amount,
        initial_holder: Address,
        sink: S,
    ) -> Result<Self, TokenError> {
        let metadata = TokenMetadata::new(name.into(), symbol.into(), total_supply)?;

        if initial_holder.is_zero() {
            return Err(TokenError::InvalidHolder);
        }

        let mut balances = HashMap::new();
        balances.insert(initial_holder, total_supply);

        log::info!(
            "Token deployed: {} ({}), supply {} credited to {}",
            metadata.name,
            metadata.symbol,
            format_units(total_supply, metadata.decimals),
            initial_holder
        );

        Ok(Self {
            metadata,
            balances,
            allowances: HashMap::new(),
            sink,
        })
    }

    // =========================================================================
    // View Functions
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn total_supply(&self) -> Amount {
        self.metadata.total_supply
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Get balance of an address
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Amount `spender` may still move out of `owner`'s balance
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Get all holders with balances
    pub fn holders(&self) -> Vec<(&Address, &Amount)> {
        self.balances.iter().filter(|(_, &b)| b > 0).collect()
    }

    /// Get holder count
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|&&b| b > 0).count()
    }

    /// Sum of all balances. Equals [`total_supply`](Self::total_supply) at all times.
    pub fn circulating(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(0u128, |acc, &b| acc.checked_add(b))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the ledger, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    // =========================================================================
    // Mutating Functions
    // =========================================================================

    /// Transfer tokens from one address to another
    ///
    /// # Arguments
    /// * `from` - Sender address
    /// * `to` - Recipient address, must not be [`Address::ZERO`]
    /// * `amount` - Amount to transfer
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Transfer, TokenError> {
        if to.is_zero() {
            return self.reject("transfer", TokenError::InvalidRecipient);
        }

        let debits = match self.plan_move(from, to, amount) {
            Ok(debits) => debits,
            Err(e) => return self.reject("transfer", e),
        };
        self.apply_move(from, to, debits);

        log::debug!("transfer {} -> {}: {}", from, to, amount);
        Ok(self.announce(Transfer {
            from,
            to,
            value: amount,
        }))
    }

    /// Approve a spender to transfer tokens on behalf of owner
    ///
    /// Overwrites any previous allowance; approving 0 revokes. The owner's
    /// balance is not consulted.
    ///
    /// # Arguments
    /// * `owner` - Token owner
    /// * `spender` - Address being approved to spend, must not be [`Address::ZERO`]
    /// * `amount` - Maximum amount spender can transfer
    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<Approval, TokenError> {
        if spender.is_zero() {
            return self.reject("approve", TokenError::InvalidSpender);
        }

        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);

        log::debug!("approve {} for {}: {}", spender, owner, amount);
        Ok(self.announce(Approval {
            owner,
            spender,
            value: amount,
        }))
    }

    /// Transfer tokens on behalf of owner (requires prior approval)
    ///
    /// The allowance drops by exactly `amount`. Only a [`Transfer`] is
    /// emitted; the allowance change is not re-announced.
    ///
    /// # Arguments
    /// * `spender` - Address performing the transfer (must have allowance)
    /// * `from` - Token owner
    /// * `to` - Recipient, must not be [`Address::ZERO`]
    /// * `amount` - Amount to transfer
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Transfer, TokenError> {
        if to.is_zero() {
            return self.reject("transfer_from", TokenError::InvalidRecipient);
        }

        let debits = match self.plan_move(from, to, amount) {
            Ok(debits) => debits,
            Err(e) => return self.reject("transfer_from", e),
        };

        let current_allowance = self.allowance(&from, &spender);
        let Some(remaining) = current_allowance.checked_sub(amount) else {
            return self.reject(
                "transfer_from",
                TokenError::InsufficientAllowance {
                    have: current_allowance,
                    need: amount,
                },
            );
        };

        self.apply_move(from, to, debits);
        self.allowances
            .entry(from)
            .or_default()
            .insert(spender, remaining);

        log::debug!(
            "transfer_from {} -> {} by {}: {} (allowance left {})",
            from,
            to,
            spender,
            amount,
            remaining
        );
        Ok(self.announce(Transfer {
            from,
            to,
            value: amount,
        }))
    }

    /// Execute `call` on behalf of `caller`
    ///
    /// The caller is the sender of a transfer, the owner of an approval and
    /// the spender of a delegated transfer.
    pub fn dispatch(&mut self, caller: Address, call: Call) -> Result<TokenEvent, TokenError> {
        match call {
            Call::Transfer { to, value } => self.transfer(caller, to, value).map(Into::into),
            Call::Approve { spender, value } => {
                self.approve(caller, spender, value).map(Into::into)
            }
            Call::TransferFrom { from, to, value } => {
                self.transfer_from(caller, from, to, value).map(Into::into)
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// New `(from, to)` balances for moving `amount`, without applying them.
    fn plan_move(
        &self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(Amount, Amount), TokenError> {
        let from_balance = self.balance_of(&from);
        let new_from = from_balance
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientBalance {
                have: from_balance,
                need: amount,
            })?;

        // Self-transfer: debit and credit cancel out
        if from == to {
            return Ok((from_balance, from_balance));
        }

        let new_to = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        Ok((new_from, new_to))
    }

    fn apply_move(&mut self, from: Address, to: Address, (new_from, new_to): (Amount, Amount)) {
        self.balances.insert(from, new_from);
        self.balances.insert(to, new_to);
    }

    fn announce<E>(&mut self, event: E) -> E
    where
        E: Clone + Into<TokenEvent>,
    {
        self.sink.emit(&event.clone().into());
        event
    }

    fn reject<T>(&self, operation: &str, error: TokenError) -> Result<T, TokenError> {
        log::debug!("{} rejected: {}", operation, error);
        Err(error)
    }
}
