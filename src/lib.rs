//! Token-Ledger: a minimal fungible-token ledger in Rust
//!
//! This crate provides an ERC-20 patterned bookkeeping ledger featuring:
//! - Per-address balances and per-owner/spender allowances
//! - Supply accounting with checked arithmetic (mint and burn only)
//! - Single-owner access control (one admin, a set of authorized minters)
//! - Timestamped event notifications for every state change
//! - JSON persistence and a thread-safe shared handle
//!
//! # Example
//!
//! ```rust
//! use token_ledger::{Address, CustomToken, TokenMetadata};
//!
//! let admin = Address::new("0xadmin");
//! let minter = Address::new("0xminter");
//! let alice = Address::new("0xalice");
//! let bob = Address::new("0xbob");
//!
//! // Deploy: the deployer becomes the admin, supply starts at zero
//! let metadata = TokenMetadata::new(
//!     "Test Token".to_string(),
//!     "TST".to_string(),
//!     18,
//!     admin.clone(),
//! ).unwrap();
//! let mut token = CustomToken::new(metadata).unwrap();
//!
//! // The admin authorizes a minter, who mints to alice
//! token.add_minter(&admin, &minter).unwrap();
//! token.mint(&minter, &alice, 1000).unwrap();
//!
//! // Alice pays bob
//! token.transfer(&alice, &bob, 100).unwrap();
//! assert_eq!(token.balance_of(&alice), 900);
//! assert_eq!(token.balance_of(&bob), 100);
//! assert_eq!(token.total_supply(), 1000);
//! ```

pub mod access;
pub mod address;
pub mod error;
pub mod service;
pub mod storage;
pub mod token;

// Re-export commonly used types
pub use access::AccessControl;
pub use address::Address;
pub use error::TokenError;
pub use service::SharedLedger;
pub use storage::{Storage, StorageConfig, StorageError};
pub use token::{CustomToken, EventKind, EventRecord, TokenInfo, TokenMetadata};
