//! Ledger event notifications
//!
//! Every successful state change emits one or more event records. The
//! ledger keeps a bounded history of recent records; operations also return
//! the records they emitted so callers can observe ordering (mint emits
//! Mint then Transfer-from-zero, burn emits Burn then Transfer-to-zero).

use crate::address::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of event records retained in the ledger's history.
pub const EVENT_HISTORY_CAP: usize = 100;

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventKind {
    Transfer {
        from: Address,
        to: Address,
        amount: u128,
    },
    Approval {
        owner: Address,
        spender: Address,
        amount: u128,
    },
    Mint {
        to: Address,
        amount: u128,
    },
    Burn {
        from: Address,
        amount: u128,
    },
    AdminChanged {
        old: Address,
        new: Address,
    },
    MinterAdded {
        minter: Address,
    },
    MinterRemoved {
        minter: Address,
    },
}

/// A timestamped event notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl EventRecord {
    pub fn new(kind: EventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Transfer { from, to, amount } => {
                write!(f, "Transfer {} -> {} amount {}", from, to, amount)
            }
            EventKind::Approval {
                owner,
                spender,
                amount,
            } => write!(f, "Approval {} allows {} up to {}", owner, spender, amount),
            EventKind::Mint { to, amount } => write!(f, "Mint {} to {}", amount, to),
            EventKind::Burn { from, amount } => write!(f, "Burn {} from {}", amount, from),
            EventKind::AdminChanged { old, new } => {
                write!(f, "AdminChanged {} -> {}", old, new)
            }
            EventKind::MinterAdded { minter } => write!(f, "MinterAdded {}", minter),
            EventKind::MinterRemoved { minter } => write!(f, "MinterRemoved {}", minter),
        }
    }
}
