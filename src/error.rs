//! Error taxonomy for ledger operations
//!
//! Every operation validates all preconditions before touching state, so a
//! returned error always means nothing was mutated.

use crate::address::Address;
use thiserror::Error;

/// Ledger and access-control errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Unauthorized: {caller} lacks the {required} role")]
    Unauthorized { caller: Address, required: &'static str },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: u128, need: u128 },
    #[error("Arithmetic overflow: supply or balance would wrap")]
    Overflow,
}
