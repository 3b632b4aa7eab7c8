//! Escrow accounts and their settlement records.

use franchise_types::{ActorId, Amount};
use serde::{Deserialize, Serialize};

/// Key of an escrow account: the id of the record that posted it.
pub type EscrowKey = u64;

/// Funds held on behalf of `owner`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowAccount {
    pub key: EscrowKey,
    pub owner: ActorId,
    pub amount: Amount,
}

/// What happens to escrowed funds when they are released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// Returned to the owner.
    Refund,
    /// Kept by the commission treasury.
    Forfeit,
}

/// A completed release. The substrate executes the transfer for refunds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub key: EscrowKey,
    pub owner: ActorId,
    pub amount: Amount,
    pub disposition: Disposition,
}
