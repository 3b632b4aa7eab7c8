//! Roles an actor may hold, and the registries a subject can appear in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A role required by an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The single election commissioner.
    Commissioner,
    /// A constituency-scoped election officer.
    Officer,
    /// The election coordinator a registry is linked to.
    Coordinator,
    /// The subject acting on their own behalf.
    Subject,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Commissioner => "commissioner",
            Self::Officer => "officer",
            Self::Coordinator => "coordinator",
            Self::Subject => "subject",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryKind {
    Voter,
    Candidate,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voter => f.write_str("voter"),
            Self::Candidate => f.write_str("candidate"),
        }
    }
}
