//! The token ledger state machine
//!
//! `CustomToken` holds balances, allowances, and total supply, and composes
//! an [`AccessControl`] for the role-gated operations. Every operation
//! validates all of its preconditions before mutating anything, so a failed
//! call leaves the ledger exactly as it was.

use crate::access::AccessControl;
use crate::address::Address;
use crate::error::TokenError;
use crate::token::events::{EventKind, EventRecord, EVENT_HISTORY_CAP};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token metadata (immutable after deployment)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Token name (e.g., "My Token")
    pub name: String,
    /// Token symbol (e.g., "MTK")
    pub symbol: String,
    /// Decimal places (usually 18)
    pub decimals: u8,
    /// Deployer address (becomes the initial admin)
    pub deployer: Address,
    /// Timestamp of deployment
    pub deployed_at: DateTime<Utc>,
}

impl TokenMetadata {
    /// Create new token metadata with validation
    pub fn new(
        name: String,
        symbol: String,
        decimals: u8,
        deployer: Address,
    ) -> Result<Self, TokenError> {
        if name.is_empty() || name.len() > 50 {
            return Err(TokenError::InvalidArgument(
                "name must be 1-50 characters".to_string(),
            ));
        }

        if symbol.is_empty() || symbol.len() > 10 {
            return Err(TokenError::InvalidArgument(
                "symbol must be 1-10 characters".to_string(),
            ));
        }

        if decimals > 18 {
            return Err(TokenError::InvalidArgument(
                "decimals must be 0-18".to_string(),
            ));
        }

        if deployer.is_zero() {
            return Err(TokenError::InvalidArgument(
                "deployer cannot be the zero address".to_string(),
            ));
        }

        Ok(Self {
            name,
            symbol,
            decimals,
            deployer,
            deployed_at: Utc::now(),
        })
    }
}

/// Snapshot returned by [`CustomToken::token_info`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: u128,
}

/// A fungible-token ledger with single-owner access control.
///
/// State starts empty at deployment: admin = deployer, no minters, no
/// balances, zero supply. Supply only moves through mint and burn, and
/// `sum(balances) == total_supply` holds after every operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomToken {
    /// Immutable token metadata
    pub metadata: TokenMetadata,
    /// Admin and minter roles
    access: AccessControl,
    /// Balances: address -> amount
    balances: HashMap<Address, u128>,
    /// Allowances: owner -> (spender -> amount)
    allowances: HashMap<Address, HashMap<Address, u128>>,
    /// Total supply, mutated only by mint and burn
    total_supply: u128,
    /// Recent event records (last 100)
    events: Vec<EventRecord>,
}

impl CustomToken {
    /// Deploy a new token. The deployer becomes the admin.
    pub fn new(metadata: TokenMetadata) -> Result<Self, TokenError> {
        let access = AccessControl::new(metadata.deployer.clone())?;
        Ok(Self {
            metadata,
            access,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            total_supply: 0,
            events: Vec::new(),
        })
    }

    // =========================================================================
    // View functions
    // =========================================================================

    /// Get token name
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Get token symbol
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Get decimal places
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Get total supply
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Get balance of an address
    pub fn balance_of(&self, address: &Address) -> u128 {
        *self.balances.get(address).unwrap_or(&0)
    }

    /// Get allowance granted by `owner` to `spender`
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Current admin address
    pub fn admin(&self) -> &Address {
        self.access.admin()
    }

    /// Whether an address is an authorized minter
    pub fn is_authorized_minter(&self, address: &Address) -> bool {
        self.access.is_minter(address)
    }

    /// Authorized minters, sorted
    pub fn minters(&self) -> Vec<&Address> {
        self.access.minters()
    }

    /// All holders with a nonzero balance
    pub fn holders(&self) -> Vec<(&Address, u128)> {
        self.balances
            .iter()
            .filter(|(_, &b)| b > 0)
            .map(|(a, &b)| (a, b))
            .collect()
    }

    /// Recent event records, oldest first
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Name, symbol, decimals, and current supply in one read
    pub fn token_info(&self) -> TokenInfo {
        TokenInfo {
            name: self.metadata.name.clone(),
            symbol: self.metadata.symbol.clone(),
            decimals: self.metadata.decimals,
            total_supply: self.total_supply,
        }
    }

    // =========================================================================
    // Role management (admin-gated, delegated to AccessControl)
    // =========================================================================

    /// Hand the admin role to `new_admin`. Caller must be the admin.
    pub fn change_admin(
        &mut self,
        caller: &Address,
        new_admin: &Address,
    ) -> Result<EventRecord, TokenError> {
        let old = self.access.change_admin(caller, new_admin)?;
        let record = EventRecord::new(EventKind::AdminChanged {
            old,
            new: new_admin.clone(),
        });
        self.record(record.clone());
        Ok(record)
    }

    /// Authorize `minter` to mint. Caller must be the admin.
    ///
    /// Returns None when the address was already a minter (no state change,
    /// no event).
    pub fn add_minter(
        &mut self,
        caller: &Address,
        minter: &Address,
    ) -> Result<Option<EventRecord>, TokenError> {
        if !self.access.add_minter(caller, minter)? {
            return Ok(None);
        }
        let record = EventRecord::new(EventKind::MinterAdded {
            minter: minter.clone(),
        });
        self.record(record.clone());
        Ok(Some(record))
    }

    /// Revoke `minter`. Caller must be the admin.
    ///
    /// Removing an address that was never a minter is a silent no-op and
    /// emits nothing.
    pub fn remove_minter(
        &mut self,
        caller: &Address,
        minter: &Address,
    ) -> Result<Option<EventRecord>, TokenError> {
        if !self.access.remove_minter(caller, minter)? {
            return Ok(None);
        }
        let record = EventRecord::new(EventKind::MinterRemoved {
            minter: minter.clone(),
        });
        self.record(record.clone());
        Ok(Some(record))
    }

    // =========================================================================
    // Supply mutation
    // =========================================================================

    /// Mint `amount` new tokens to `to`. Caller must be an authorized
    /// minter. Emits Mint then Transfer-from-zero, in that order.
    pub fn mint(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<Vec<EventRecord>, TokenError> {
        self.access.require_minter(caller)?;
        if to.is_zero() {
            return Err(TokenError::InvalidArgument(
                "cannot mint to the zero address".to_string(),
            ));
        }

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.total_supply = new_supply;
        self.balances.insert(to.clone(), new_balance);

        log::info!("Minted {} {} to {}", amount, self.metadata.symbol, to);

        let records = vec![
            EventRecord::new(EventKind::Mint {
                to: to.clone(),
                amount,
            }),
            EventRecord::new(EventKind::Transfer {
                from: Address::zero(),
                to: to.clone(),
                amount,
            }),
        ];
        for record in &records {
            self.record(record.clone());
        }
        Ok(records)
    }

    /// Burn `amount` tokens from `from`. Caller must be the admin. Emits
    /// Burn then Transfer-to-zero, in that order.
    pub fn burn(
        &mut self,
        caller: &Address,
        from: &Address,
        amount: u128,
    ) -> Result<Vec<EventRecord>, TokenError> {
        self.access.require_admin(caller)?;

        let have = self.balance_of(from);
        if have < amount {
            return Err(TokenError::InsufficientBalance { have, need: amount });
        }

        self.balances.insert(from.clone(), have - amount);
        // Supply cannot underflow: it is the sum of all balances and the
        // balance check above already passed.
        self.total_supply -= amount;

        log::info!("Burned {} {} from {}", amount, self.metadata.symbol, from);

        let records = vec![
            EventRecord::new(EventKind::Burn {
                from: from.clone(),
                amount,
            }),
            EventRecord::new(EventKind::Transfer {
                from: from.clone(),
                to: Address::zero(),
                amount,
            }),
        ];
        for record in &records {
            self.record(record.clone());
        }
        Ok(records)
    }

    // =========================================================================
    // Transfers and allowances
    // =========================================================================

    /// Transfer `amount` from the caller to `to`.
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<EventRecord, TokenError> {
        self.transfer_internal(caller, to, amount)
    }

    /// Set the allowance for (caller, spender) to `amount`, overwriting any
    /// prior value.
    pub fn approve(
        &mut self,
        caller: &Address,
        spender: &Address,
        amount: u128,
    ) -> Result<EventRecord, TokenError> {
        if caller.is_zero() || spender.is_zero() {
            return Err(TokenError::InvalidArgument(
                "approve requires nonzero owner and spender".to_string(),
            ));
        }

        self.allowances
            .entry(caller.clone())
            .or_default()
            .insert(spender.clone(), amount);

        log::info!("Approval: {} allows {} up to {}", caller, spender, amount);

        let record = EventRecord::new(EventKind::Approval {
            owner: caller.clone(),
            spender: spender.clone(),
            amount,
        });
        self.record(record.clone());
        Ok(record)
    }

    /// Move `amount` from `from` to `to` on the strength of a prior
    /// approval. The allowance for (from, caller) is decremented, then the
    /// balance moves.
    pub fn transfer_from(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<EventRecord, TokenError> {
        let allowed = self.allowance(from, caller);
        if allowed < amount {
            return Err(TokenError::InsufficientAllowance {
                have: allowed,
                need: amount,
            });
        }

        // Validate the transfer before the allowance moves, so a failure
        // leaves both untouched.
        self.check_transfer(from, to, amount)?;

        self.allowances
            .entry(from.clone())
            .or_default()
            .insert(caller.clone(), allowed - amount);

        Ok(self.apply_transfer(from, to, amount))
    }

    /// Validate the preconditions of a transfer without mutating anything.
    fn check_transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), TokenError> {
        if from.is_zero() || to.is_zero() {
            return Err(TokenError::InvalidArgument(
                "transfer requires nonzero from and to addresses".to_string(),
            ));
        }

        let have = self.balance_of(from);
        if have < amount {
            return Err(TokenError::InsufficientBalance { have, need: amount });
        }

        if from != to {
            self.balance_of(to)
                .checked_add(amount)
                .ok_or(TokenError::Overflow)?;
        }

        Ok(())
    }

    /// Move the balance. Preconditions must already hold.
    fn apply_transfer(&mut self, from: &Address, to: &Address, amount: u128) -> EventRecord {
        *self.balances.entry(from.clone()).or_insert(0) -= amount;
        *self.balances.entry(to.clone()).or_insert(0) += amount;

        log::info!(
            "Transfer: {} {} from {} to {}",
            amount,
            self.metadata.symbol,
            from,
            to
        );

        let record = EventRecord::new(EventKind::Transfer {
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        self.record(record.clone());
        record
    }

    fn transfer_internal(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<EventRecord, TokenError> {
        self.check_transfer(from, to, amount)?;
        Ok(self.apply_transfer(from, to, amount))
    }

    /// Append to the event history, dropping the oldest past the cap.
    fn record(&mut self, record: EventRecord) {
        self.events.push(record);
        if self.events.len() > EVENT_HISTORY_CAP {
            self.events.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::new(s)
    }

    fn deploy() -> CustomToken {
        let metadata = TokenMetadata::new(
            "Test Token".to_string(),
            "TST".to_string(),
            18,
            addr("0xadmin"),
        )
        .unwrap();
        CustomToken::new(metadata).unwrap()
    }

    /// Deploy and authorize "0xminter" as a minter.
    fn deploy_with_minter() -> CustomToken {
        let mut token = deploy();
        token.add_minter(&addr("0xadmin"), &addr("0xminter")).unwrap();
        token
    }

    fn supply_from_balances(token: &CustomToken) -> u128 {
        token.holders().iter().map(|(_, b)| b).sum()
    }

    #[test]
    fn test_deployment_state() {
        let token = deploy();

        assert_eq!(token.name(), "Test Token");
        assert_eq!(token.symbol(), "TST");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.total_supply(), 0);
        assert_eq!(token.admin(), &addr("0xadmin"));
        assert!(token.holders().is_empty());
        assert!(token.events().is_empty());
    }

    #[test]
    fn test_metadata_validation() {
        let deployer = addr("0xadmin");

        // Empty name
        assert!(matches!(
            TokenMetadata::new("".into(), "TST".into(), 18, deployer.clone()),
            Err(TokenError::InvalidArgument(_))
        ));

        // Symbol too long
        assert!(matches!(
            TokenMetadata::new("Test".into(), "TOOLONGSYMBOL".into(), 18, deployer.clone()),
            Err(TokenError::InvalidArgument(_))
        ));

        // Decimals out of range
        assert!(matches!(
            TokenMetadata::new("Test".into(), "TST".into(), 19, deployer.clone()),
            Err(TokenError::InvalidArgument(_))
        ));

        // Zero deployer
        assert!(matches!(
            TokenMetadata::new("Test".into(), "TST".into(), 18, Address::zero()),
            Err(TokenError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_mint_requires_minter_role() {
        let mut token = deploy();

        // The admin is not automatically a minter
        let result = token.mint(&addr("0xadmin"), &addr("0xuser1"), 1000);
        assert!(matches!(result, Err(TokenError::Unauthorized { .. })));
        assert_eq!(token.total_supply(), 0);
    }

    #[test]
    fn test_mint_and_event_order() {
        let mut token = deploy_with_minter();

        let records = token.mint(&addr("0xminter"), &addr("0xuser1"), 1000).unwrap();

        assert_eq!(token.balance_of(&addr("0xuser1")), 1000);
        assert_eq!(token.total_supply(), 1000);

        // Mint first, then the Transfer from the zero address
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].kind,
            EventKind::Mint {
                to: addr("0xuser1"),
                amount: 1000
            }
        );
        assert_eq!(
            records[1].kind,
            EventKind::Transfer {
                from: Address::zero(),
                to: addr("0xuser1"),
                amount: 1000
            }
        );
    }

    #[test]
    fn test_mint_to_zero_address() {
        let mut token = deploy_with_minter();

        let result = token.mint(&addr("0xminter"), &Address::zero(), 1000);
        assert!(matches!(result, Err(TokenError::InvalidArgument(_))));
        assert_eq!(token.total_supply(), 0);
    }

    #[test]
    fn test_mint_overflow() {
        let mut token = deploy_with_minter();

        token
            .mint(&addr("0xminter"), &addr("0xuser1"), u128::MAX)
            .unwrap();

        let result = token.mint(&addr("0xminter"), &addr("0xuser2"), 1);
        assert!(matches!(result, Err(TokenError::Overflow)));

        // Nothing changed on failure
        assert_eq!(token.total_supply(), u128::MAX);
        assert_eq!(token.balance_of(&addr("0xuser2")), 0);
    }

    #[test]
    fn test_burn_requires_admin() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 1000).unwrap();

        // Minter role does not include burn
        let result = token.burn(&addr("0xminter"), &addr("0xuser1"), 100);
        assert!(matches!(result, Err(TokenError::Unauthorized { .. })));
        assert_eq!(token.balance_of(&addr("0xuser1")), 1000);
    }

    #[test]
    fn test_burn_and_event_order() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 1000).unwrap();

        let records = token.burn(&addr("0xadmin"), &addr("0xuser1"), 400).unwrap();

        assert_eq!(token.balance_of(&addr("0xuser1")), 600);
        assert_eq!(token.total_supply(), 600);

        // Burn first, then the Transfer to the zero address
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].kind,
            EventKind::Burn {
                from: addr("0xuser1"),
                amount: 400
            }
        );
        assert_eq!(
            records[1].kind,
            EventKind::Transfer {
                from: addr("0xuser1"),
                to: Address::zero(),
                amount: 400
            }
        );
    }

    #[test]
    fn test_burn_insufficient_balance() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 100).unwrap();

        let result = token.burn(&addr("0xadmin"), &addr("0xuser1"), 101);
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { have: 100, need: 101 })
        ));
        assert_eq!(token.balance_of(&addr("0xuser1")), 100);
        assert_eq!(token.total_supply(), 100);
    }

    #[test]
    fn test_mint_burn_round_trip() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 500).unwrap();

        let balance_before = token.balance_of(&addr("0xuser1"));
        let supply_before = token.total_supply();

        token.mint(&addr("0xminter"), &addr("0xuser1"), 250).unwrap();
        token.burn(&addr("0xadmin"), &addr("0xuser1"), 250).unwrap();

        assert_eq!(token.balance_of(&addr("0xuser1")), balance_before);
        assert_eq!(token.total_supply(), supply_before);
    }

    #[test]
    fn test_transfer_scenario() {
        // Deploy, authorize a minter, mint 1000 to user1, move 100 to user2
        let mut token = deploy();
        token.add_minter(&addr("0xadmin"), &addr("0xminter")).unwrap();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 1000).unwrap();

        assert_eq!(token.balance_of(&addr("0xuser1")), 1000);
        assert_eq!(token.total_supply(), 1000);

        let record = token.transfer(&addr("0xuser1"), &addr("0xuser2"), 100).unwrap();
        assert_eq!(
            record.kind,
            EventKind::Transfer {
                from: addr("0xuser1"),
                to: addr("0xuser2"),
                amount: 100
            }
        );
        assert_eq!(token.balance_of(&addr("0xuser1")), 900);
        assert_eq!(token.balance_of(&addr("0xuser2")), 100);
        assert_eq!(token.total_supply(), 1000);
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 100).unwrap();

        let result = token.transfer(&addr("0xuser1"), &addr("0xuser2"), 101);
        assert!(matches!(
            result,
            Err(TokenError::InsufficientBalance { have: 100, need: 101 })
        ));

        // Both balances untouched
        assert_eq!(token.balance_of(&addr("0xuser1")), 100);
        assert_eq!(token.balance_of(&addr("0xuser2")), 0);
    }

    #[test]
    fn test_transfer_to_zero_address() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 100).unwrap();

        let result = token.transfer(&addr("0xuser1"), &Address::zero(), 50);
        assert!(matches!(result, Err(TokenError::InvalidArgument(_))));
        assert_eq!(token.balance_of(&addr("0xuser1")), 100);
    }

    #[test]
    fn test_zero_amount_and_self_transfer() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 100).unwrap();

        // Both are permitted no-ops on balances
        token.transfer(&addr("0xuser1"), &addr("0xuser2"), 0).unwrap();
        token.transfer(&addr("0xuser1"), &addr("0xuser1"), 100).unwrap();

        assert_eq!(token.balance_of(&addr("0xuser1")), 100);
        assert_eq!(token.balance_of(&addr("0xuser2")), 0);
        assert_eq!(token.total_supply(), 100);
    }

    #[test]
    fn test_approve_is_absolute() {
        let mut token = deploy();

        token.approve(&addr("0xuser1"), &addr("0xspender"), 5000).unwrap();
        assert_eq!(token.allowance(&addr("0xuser1"), &addr("0xspender")), 5000);

        // Overwrites, never adds
        token.approve(&addr("0xuser1"), &addr("0xspender"), 3000).unwrap();
        assert_eq!(token.allowance(&addr("0xuser1"), &addr("0xspender")), 3000);

        // Revoke
        token.approve(&addr("0xuser1"), &addr("0xspender"), 0).unwrap();
        assert_eq!(token.allowance(&addr("0xuser1"), &addr("0xspender")), 0);
    }

    #[test]
    fn test_approve_zero_spender() {
        let mut token = deploy();

        let result = token.approve(&addr("0xuser1"), &Address::zero(), 100);
        assert!(matches!(result, Err(TokenError::InvalidArgument(_))));
    }

    #[test]
    fn test_allowance_may_exceed_balance() {
        let mut token = deploy();

        // user1 holds nothing, the approval still stands
        token.approve(&addr("0xuser1"), &addr("0xspender"), 1_000_000).unwrap();
        assert_eq!(token.balance_of(&addr("0xuser1")), 0);
        assert_eq!(
            token.allowance(&addr("0xuser1"), &addr("0xspender")),
            1_000_000
        );
    }

    #[test]
    fn test_transfer_from_decrements_allowance() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 1000).unwrap();
        token.approve(&addr("0xuser1"), &addr("0xspender"), 500).unwrap();

        token
            .transfer_from(&addr("0xspender"), &addr("0xuser1"), &addr("0xuser2"), 200)
            .unwrap();

        assert_eq!(token.balance_of(&addr("0xuser1")), 800);
        assert_eq!(token.balance_of(&addr("0xuser2")), 200);
        assert_eq!(token.allowance(&addr("0xuser1"), &addr("0xspender")), 300);

        // One more than the remaining allowance fails
        let result =
            token.transfer_from(&addr("0xspender"), &addr("0xuser1"), &addr("0xuser2"), 301);
        assert!(matches!(
            result,
            Err(TokenError::InsufficientAllowance { have: 300, need: 301 })
        ));
        assert_eq!(token.allowance(&addr("0xuser1"), &addr("0xspender")), 300);
    }

    #[test]
    fn test_transfer_from_failure_preserves_allowance() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 100).unwrap();
        // Allowance covers more than the balance
        token.approve(&addr("0xuser1"), &addr("0xspender"), 500).unwrap();

        let result =
            token.transfer_from(&addr("0xspender"), &addr("0xuser1"), &addr("0xuser2"), 200);
        assert!(matches!(result, Err(TokenError::InsufficientBalance { .. })));

        // The balance check failed, so the allowance must not have moved
        assert_eq!(token.allowance(&addr("0xuser1"), &addr("0xspender")), 500);
        assert_eq!(token.balance_of(&addr("0xuser1")), 100);
        assert_eq!(token.balance_of(&addr("0xuser2")), 0);
    }

    #[test]
    fn test_admin_gated_operations_reject_others() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 1000).unwrap();

        let outsider = addr("0xoutsider");

        assert!(matches!(
            token.change_admin(&outsider, &addr("0xnew")),
            Err(TokenError::Unauthorized { .. })
        ));
        assert!(matches!(
            token.add_minter(&outsider, &addr("0xnew")),
            Err(TokenError::Unauthorized { .. })
        ));
        assert!(matches!(
            token.remove_minter(&outsider, &addr("0xminter")),
            Err(TokenError::Unauthorized { .. })
        ));
        assert!(matches!(
            token.burn(&outsider, &addr("0xuser1"), 1),
            Err(TokenError::Unauthorized { .. })
        ));

        // Nothing moved
        assert_eq!(token.admin(), &addr("0xadmin"));
        assert!(token.is_authorized_minter(&addr("0xminter")));
        assert_eq!(token.balance_of(&addr("0xuser1")), 1000);
    }

    #[test]
    fn test_change_admin_to_zero_fails() {
        let mut token = deploy();

        let result = token.change_admin(&addr("0xadmin"), &Address::zero());
        assert!(matches!(result, Err(TokenError::InvalidArgument(_))));
        assert_eq!(token.admin(), &addr("0xadmin"));
    }

    #[test]
    fn test_change_admin_hands_over_burn_rights() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 100).unwrap();

        let record = token.change_admin(&addr("0xadmin"), &addr("0xnew")).unwrap();
        assert_eq!(
            record.kind,
            EventKind::AdminChanged {
                old: addr("0xadmin"),
                new: addr("0xnew")
            }
        );

        // Old admin can no longer burn, the new one can
        assert!(matches!(
            token.burn(&addr("0xadmin"), &addr("0xuser1"), 10),
            Err(TokenError::Unauthorized { .. })
        ));
        token.burn(&addr("0xnew"), &addr("0xuser1"), 10).unwrap();
        assert_eq!(token.balance_of(&addr("0xuser1")), 90);
    }

    #[test]
    fn test_remove_minter_no_op_emits_nothing() {
        let mut token = deploy();

        let record = token
            .remove_minter(&addr("0xadmin"), &addr("0xnever"))
            .unwrap();
        assert!(record.is_none());
        assert!(token.events().is_empty());
    }

    #[test]
    fn test_supply_conservation_across_sequences() {
        let mut token = deploy_with_minter();
        let minter = addr("0xminter");
        let admin = addr("0xadmin");
        let (a, b, c) = (addr("0xaa"), addr("0xbb"), addr("0xcc"));

        token.mint(&minter, &a, 1000).unwrap();
        assert_eq!(supply_from_balances(&token), token.total_supply());

        token.transfer(&a, &b, 250).unwrap();
        assert_eq!(supply_from_balances(&token), token.total_supply());

        token.mint(&minter, &c, 500).unwrap();
        assert_eq!(supply_from_balances(&token), token.total_supply());

        token.burn(&admin, &b, 100).unwrap();
        assert_eq!(supply_from_balances(&token), token.total_supply());

        token.approve(&c, &a, 400).unwrap();
        token.transfer_from(&a, &c, &b, 300).unwrap();
        assert_eq!(supply_from_balances(&token), token.total_supply());

        token.burn(&admin, &a, 750).unwrap();
        assert_eq!(supply_from_balances(&token), token.total_supply());
        assert_eq!(token.total_supply(), 650);
    }

    #[test]
    fn test_event_history_is_bounded() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 1_000_000).unwrap();

        for _ in 0..EVENT_HISTORY_CAP + 20 {
            token.transfer(&addr("0xuser1"), &addr("0xuser2"), 1).unwrap();
        }

        assert_eq!(token.events().len(), EVENT_HISTORY_CAP);
        // Newest record is at the back
        assert_eq!(
            token.events().last().unwrap().kind,
            EventKind::Transfer {
                from: addr("0xuser1"),
                to: addr("0xuser2"),
                amount: 1
            }
        );
    }

    #[test]
    fn test_token_info() {
        let mut token = deploy_with_minter();
        token.mint(&addr("0xminter"), &addr("0xuser1"), 42).unwrap();

        let info = token.token_info();
        assert_eq!(info.name, "Test Token");
        assert_eq!(info.symbol, "TST");
        assert_eq!(info.decimals, 18);
        assert_eq!(info.total_supply, 42);
    }
}
