//! Admin and minter role management

use crate::address::Address;
use crate::error::TokenError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Role state: a single admin and the set of authorized minters.
///
/// There is exactly one admin at a time. The admin manages the minter set
/// and names its own successor; nothing else can touch either.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessControl {
    admin: Address,
    minters: HashSet<Address>,
}

impl AccessControl {
    /// Create with the given initial admin.
    pub fn new(admin: Address) -> Result<Self, TokenError> {
        if admin.is_zero() {
            return Err(TokenError::InvalidArgument(
                "admin cannot be the zero address".to_string(),
            ));
        }
        Ok(Self {
            admin,
            minters: HashSet::new(),
        })
    }

    /// Current admin address.
    pub fn admin(&self) -> &Address {
        &self.admin
    }

    /// Whether an address is an authorized minter.
    pub fn is_minter(&self, address: &Address) -> bool {
        self.minters.contains(address)
    }

    /// Number of authorized minters.
    pub fn minter_count(&self) -> usize {
        self.minters.len()
    }

    /// Authorized minters, sorted for stable output.
    pub fn minters(&self) -> Vec<&Address> {
        let mut list: Vec<&Address> = self.minters.iter().collect();
        list.sort();
        list
    }

    /// Guard: caller must be the current admin.
    pub fn require_admin(&self, caller: &Address) -> Result<(), TokenError> {
        if caller != &self.admin {
            return Err(TokenError::Unauthorized {
                caller: caller.clone(),
                required: "admin",
            });
        }
        Ok(())
    }

    /// Guard: caller must be an authorized minter.
    pub fn require_minter(&self, caller: &Address) -> Result<(), TokenError> {
        if !self.minters.contains(caller) {
            return Err(TokenError::Unauthorized {
                caller: caller.clone(),
                required: "minter",
            });
        }
        Ok(())
    }

    /// Hand the admin role to a successor. Returns the previous admin.
    pub fn change_admin(
        &mut self,
        caller: &Address,
        new_admin: &Address,
    ) -> Result<Address, TokenError> {
        self.require_admin(caller)?;
        if new_admin.is_zero() {
            return Err(TokenError::InvalidArgument(
                "new admin cannot be the zero address".to_string(),
            ));
        }

        let old = std::mem::replace(&mut self.admin, new_admin.clone());
        log::info!("Admin changed: {} -> {}", old, new_admin);
        Ok(old)
    }

    /// Authorize a minter. Returns false if it was already authorized.
    pub fn add_minter(&mut self, caller: &Address, minter: &Address) -> Result<bool, TokenError> {
        self.require_admin(caller)?;
        if minter.is_zero() {
            return Err(TokenError::InvalidArgument(
                "minter cannot be the zero address".to_string(),
            ));
        }

        let added = self.minters.insert(minter.clone());
        if added {
            log::info!("Minter added: {}", minter);
        }
        Ok(added)
    }

    /// Revoke a minter. Silent no-op (returns false) if not a member.
    pub fn remove_minter(
        &mut self,
        caller: &Address,
        minter: &Address,
    ) -> Result<bool, TokenError> {
        self.require_admin(caller)?;

        let removed = self.minters.remove(minter);
        if removed {
            log::info!("Minter removed: {}", minter);
        }
        Ok(removed)
    }
}
