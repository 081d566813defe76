//! Single-owner access control
//!
//! Tracks one admin address and a set of authorized minters. Every
//! privileged ledger operation runs one of the role guards here before it
//! mutates anything.

pub mod control;

pub use control::AccessControl;
