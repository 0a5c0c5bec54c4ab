//! Shared, serialized access to a ledger
//!
//! [`SharedLedger`] lets concurrent request handlers drive one ledger.
//! Mutations take the write lock, so they are applied one at a time and each
//! runs to completion before the next begins. Reads share the read lock.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::token::address::Address;
use crate::token::amount::Amount;
use crate::token::call::Call;
use crate::token::error::TokenError;
use crate::token::events::{Approval, EventLog, EventSink, TokenEvent, Transfer};
use crate::token::ledger::TokenLedger;

/// Cloneable handle to a ledger behind an async read/write lock
#[derive(Debug)]
pub struct SharedLedger<S = EventLog> {
    inner: Arc<RwLock<TokenLedger<S>>>,
}

impl<S> Clone for SharedLedger<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EventSink> From<TokenLedger<S>> for SharedLedger<S> {
    fn from(ledger: TokenLedger<S>) -> Self {
        Self::new(ledger)
    }
}

impl<S: EventSink> SharedLedger<S> {
    pub fn new(ledger: TokenLedger<S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub async fn balance_of(&self, account: &Address) -> Amount {
        self.inner.read().await.balance_of(account)
    }

    pub async fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.inner.read().await.allowance(owner, spender)
    }

    pub async fn total_supply(&self) -> Amount {
        self.inner.read().await.total_supply()
    }

    pub async fn transfer(
        &self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Transfer, TokenError> {
        self.inner.write().await.transfer(from, to, amount)
    }

    pub async fn approve(
        &self,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<Approval, TokenError> {
        self.inner.write().await.approve(owner, spender, amount)
    }

    pub async fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Transfer, TokenError> {
        self.inner
            .write()
            .await
            .transfer_from(spender, from, to, amount)
    }

    pub async fn dispatch(&self, caller: Address, call: Call) -> Result<TokenEvent, TokenError> {
        self.inner.write().await.dispatch(caller, call)
    }

    /// Run `f` against the ledger under the read lock
    pub async fn read<R>(&self, f: impl FnOnce(&TokenLedger<S>) -> R) -> R {
        f(&*self.inner.read().await)
    }

    /// Run `f` against the ledger under the write lock
    pub async fn write<R>(&self, f: impl FnOnce(&mut TokenLedger<S>) -> R) -> R {
        f(&mut *self.inner.write().await)
    }
}
