//! Escrow of candidate security deposits.
//!
//! A deposit is held against the record that posted it and stays untouched
//! until it is released exactly once, either refunded to its owner or
//! forfeited to the commission treasury:
//! `total_held = Σ amount(account)` over every unreleased account.

pub mod account;
pub mod ledger;

pub use account::{Disposition, EscrowAccount, EscrowKey, Settlement};
pub use franchise_types::EscrowError;
pub use ledger::EscrowLedger;
