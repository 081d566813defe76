//! ERC-20 style fungible-token ledger
//!
//! Provides balances per address, allowances for delegated transfers, and
//! role-gated supply changes:
//! - mint (minter-gated) and burn (admin-gated)
//! - transfer, approve, transfer_from (public)
//!
//! # Example
//!
//! ```
//! use token_ledger::{Address, CustomToken, TokenMetadata};
//!
//! let admin = Address::new("0xadmin");
//! let minter = Address::new("0xminter");
//! let user = Address::new("0xuser");
//!
//! let metadata = TokenMetadata::new(
//!     "My Token".to_string(),
//!     "MTK".to_string(),
//!     18,
//!     admin.clone(),
//! ).unwrap();
//! let mut token = CustomToken::new(metadata).unwrap();
//!
//! token.add_minter(&admin, &minter).unwrap();
//! token.mint(&minter, &user, 1000).unwrap();
//!
//! assert_eq!(token.balance_of(&user), 1000);
//! assert_eq!(token.total_supply(), 1000);
//! ```

pub mod events;
pub mod token;

pub use events::{EventKind, EventRecord, EVENT_HISTORY_CAP};
pub use token::{CustomToken, TokenInfo, TokenMetadata};
