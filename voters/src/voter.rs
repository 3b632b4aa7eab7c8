//! Voter records.

use franchise_types::{ActorId, ConstituencyId, NationalIdHash, VoterCode};
use serde::{Deserialize, Serialize};

/// Registry-assigned voter number, starting at 1 and never reused.
pub type VoterId = u64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: VoterId,
    pub actor: ActorId,
    pub name: String,
    pub age: u32,
    pub national_id: NationalIdHash,
    pub voter_code: VoterCode,
    pub constituency: ConstituencyId,
    pub registered: bool,
    pub allowed_to_vote: bool,
    /// Set once by the linked coordinator when the voter's ballot is counted.
    pub has_voted: bool,
}

/// Aggregate counts over the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterStatistics {
    pub total_registered: u64,
    /// Distinct constituencies with at least one registered voter.
    pub total_constituencies: u64,
    pub total_verified: u64,
}
