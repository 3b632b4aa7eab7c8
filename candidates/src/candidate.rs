//! Candidate records and registration input.

use franchise_types::{ActorId, Amount, ConstituencyId};
use serde::{Deserialize, Serialize};

/// Registry-assigned candidate number, starting at 1 and never reused.
pub type CandidateId = u64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub actor: ActorId,
    pub name: String,
    pub party: String,
    /// Declared security deposit.
    pub deposit: Amount,
    pub age: u32,
    pub constituency: ConstituencyId,
    pub registered: bool,
    pub can_contest: bool,
}

/// What a prospective candidate declares at registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateApplication {
    pub actor: ActorId,
    pub name: String,
    pub party: String,
    pub deposit: Amount,
    pub age: u32,
    pub constituency: ConstituencyId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateStatistics {
    pub total_registered: u64,
    /// Distinct constituencies with at least one registered candidate.
    pub total_constituencies: u64,
    pub total_contesting: u64,
    pub total_escrowed: Amount,
}

/// A candidate's result as reported by the coordinator for settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteShare {
    pub candidate: ActorId,
    pub votes: u64,
    /// All votes cast in the candidate's constituency.
    pub constituency_total: u64,
}
