//! Candidate registry.
//!
//! Registration requires a security deposit transferred with the call and
//! exactly equal to the declared amount; it is held in escrow against the
//! candidate's record. Officers of the candidate's constituency decide
//! whether the candidate may contest. Deposits leave escrow only through
//! commissioner removal (refund), disqualification (forfeit), or the
//! post-declaration settlement driven by the linked coordinator.

pub mod candidate;
pub mod registry;

pub use candidate::{Candidate, CandidateApplication, CandidateId, CandidateStatistics, VoteShare};
pub use registry::CandidateRegistry;
