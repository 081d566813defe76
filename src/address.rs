//! Ledger addresses
//!
//! Addresses are 20-byte identifiers rendered as lowercase `0x`-prefixed
//! hex strings. The zero address is reserved: it is never a valid account,
//! and mint/burn notifications use it as the implicit counterparty.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hex digits in an address (20 bytes).
const ADDRESS_HEX_LEN: usize = 40;

/// An account address.
///
/// Stored in normalized form: lowercase hex with a `0x` prefix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// The reserved zero address.
    pub fn zero() -> Self {
        Address(format!("0x{}", "0".repeat(ADDRESS_HEX_LEN)))
    }

    /// Create an address from a string, normalizing case and prefix.
    pub fn new(s: &str) -> Self {
        let hex_part = s.strip_prefix("0x").unwrap_or(s);
        Address(format!("0x{}", hex_part.to_lowercase()))
    }

    /// Derive a fresh address from a label and nonce.
    pub fn derive(label: &str, nonce: u64) -> Self {
        let input = format!("{}:{}", label, nonce);
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        let hash = hasher.finalize();
        let hex = hex::encode(hash);
        Address(format!("0x{}", &hex[..ADDRESS_HEX_LEN]))
    }

    /// Whether this is the reserved zero address.
    pub fn is_zero(&self) -> bool {
        self.0[2..].bytes().all(|b| b == b'0')
    }

    /// The normalized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Address::new(s)
    }
}
