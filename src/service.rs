//! Shared-ledger handle
//!
//! The ledger itself is a plain single-threaded state machine. Embedders
//! that share it across threads go through [`SharedLedger`], which holds
//! the state behind one RwLock so state-changing calls serialize: each
//! operation commits in full under the write lock before the next begins.

use crate::address::Address;
use crate::error::TokenError;
use crate::token::{CustomToken, EventRecord, TokenInfo};
use parking_lot::RwLock;
use std::sync::Arc;

/// A cloneable, thread-safe handle to one token ledger.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<CustomToken>>,
}

impl SharedLedger {
    pub fn new(token: CustomToken) -> Self {
        Self {
            inner: Arc::new(RwLock::new(token)),
        }
    }

    /// Run a closure against a snapshot of the ledger state.
    pub fn read<R>(&self, f: impl FnOnce(&CustomToken) -> R) -> R {
        f(&self.inner.read())
    }

    // State-changing operations, one write lock each.

    pub fn mint(
        &self,
        caller: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<Vec<EventRecord>, TokenError> {
        self.inner.write().mint(caller, to, amount)
    }

    pub fn burn(
        &self,
        caller: &Address,
        from: &Address,
        amount: u128,
    ) -> Result<Vec<EventRecord>, TokenError> {
        self.inner.write().burn(caller, from, amount)
    }

    pub fn transfer(
        &self,
        caller: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<EventRecord, TokenError> {
        self.inner.write().transfer(caller, to, amount)
    }

    pub fn approve(
        &self,
        caller: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<EventRecord, TokenError> {
        self.inner.write().approve(caller, spender, amount)
    }

    pub fn transfer_from(
        &self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<EventRecord, TokenError> {
        self.inner.write().transfer_from(caller, from, to, amount)
    }

    pub fn change_admin(
        &self,
        caller: &Address,
        new_admin: &Address,
    ) -> Result<EventRecord, TokenError> {
        self.inner.write().change_admin(caller, new_admin)
    }

    pub fn add_minter(
        &self,
        caller: &Address,
        minter: &Address,
    ) -> Result<Option<EventRecord>, TokenError> {
        self.inner.write().add_minter(caller, minter)
    }

    pub fn remove_minter(
        &self,
        caller: &Address,
        minter: &Address,
    ) -> Result<Option<EventRecord>, TokenError> {
        self.inner.write().remove_minter(caller, minter)
    }

    // Read accessors.

    pub fn balance_of(&self, address: &Address) -> u128 {
        self.inner.read().balance_of(address)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.inner.read().allowance(owner, spender)
    }

    pub fn admin(&self) -> Address {
        self.inner.read().admin().clone()
    }

    pub fn is_authorized_minter(&self, address: &Address) -> bool {
        self.inner.read().is_authorized_minter(address)
    }

    pub fn token_info(&self) -> TokenInfo {
        self.inner.read().token_info()
    }
}
