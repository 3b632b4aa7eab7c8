//! Voter registry.
//!
//! Lifecycle per actor: `Unregistered → Registered { allowed_to_vote }`.
//! Registration is self-service; the `allowed_to_vote` flag is set only by
//! the officer serving the voter's constituency after the voter's national
//! id and voter code check out. The commissioner may hard-remove a record.

pub mod registry;
pub mod voter;

pub use registry::VoterRegistry;
pub use voter::{Voter, VoterId, VoterStatistics};
