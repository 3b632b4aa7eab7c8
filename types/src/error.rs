//! Error taxonomy shared by every election component.
//!
//! Each rejection reason is its own variant carrying the context needed to
//! handle it programmatically. A failed operation commits no state.

use thiserror::Error;

use crate::actor::{ActorId, ConstituencyId};
use crate::amount::Amount;
use crate::credential::Credential;
use crate::role::{RegistryKind, Role};
use crate::time::Timestamp;

/// Common error type for the election core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    #[error("{actor} lacks the {required} role")]
    PermissionDenied { actor: ActorId, required: Role },

    #[error("{actor} is already registered as a {registry}")]
    AlreadyRegistered {
        actor: ActorId,
        registry: RegistryKind,
    },

    #[error("registry is already linked to coordinator {coordinator}")]
    AlreadyLinked { coordinator: ActorId },

    #[error("registry is not linked to an election coordinator")]
    NotLinked,

    #[error("duplicate officer: {0}")]
    DuplicateOfficer(DuplicateOfficer),

    #[error("{0} not found")]
    NotFound(Subject),

    #[error("constituency mismatch: acting party serves {expected}, subject belongs to {found}")]
    ConstituencyMismatch {
        expected: ConstituencyId,
        found: ConstituencyId,
    },

    #[error("{0} mismatch")]
    CredentialMismatch(Credential),

    #[error("incorrect deposit: declared {declared}, transferred {transferred}")]
    IncorrectDeposit { declared: Amount, transferred: Amount },

    #[error("operation at {now} outside the election window [{start}, {end})")]
    TimeWindowViolation {
        now: Timestamp,
        start: Timestamp,
        end: Timestamp,
    },

    #[error("election window end {end} must be after start {start}")]
    InvalidElectionWindow { start: Timestamp, end: Timestamp },

    #[error("{actor} is {age}, below the minimum age of {minimum}")]
    Ineligible { actor: ActorId, age: u32, minimum: u32 },

    #[error("voter {0} is not allowed to vote")]
    NotAllowedToVote(ActorId),

    #[error("candidate {0} cannot contest")]
    CannotContest(ActorId),

    #[error("voter {0} has already voted")]
    AlreadyVoted(ActorId),

    #[error("election results have already been declared")]
    ResultsAlreadyDeclared,

    #[error("invalid actor identity: {0:?}")]
    InvalidIdentity(String),

    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    #[error("escrow error: {0}")]
    Escrow(#[from] EscrowError),
}

/// Escrow ledger failures, keyed by the escrow account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscrowError {
    #[error("escrow {0} is already held")]
    AlreadyHeld(u64),

    #[error("no escrow held for {0}")]
    NotHeld(u64),

    #[error("arithmetic overflow adding {amount} to escrow totals")]
    Overflow { amount: Amount },
}

/// Why an officer appointment collided with the existing roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DuplicateOfficer {
    /// The actor already serves as an officer.
    Actor(ActorId),
    /// The constituency already has an officer.
    Constituency {
        constituency: ConstituencyId,
        incumbent: ActorId,
    },
}

impl std::fmt::Display for DuplicateOfficer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Actor(actor) => write!(f, "{actor} is already an officer"),
            Self::Constituency {
                constituency,
                incumbent,
            } => write!(f, "{constituency} is already staffed by {incumbent}"),
        }
    }
}

/// The record a lookup failed to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Officer(ActorId),
    Voter(ActorId),
    VoterId(u64),
    Candidate(ActorId),
    CandidateId(u64),
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Officer(actor) => write!(f, "officer {actor}"),
            Self::Voter(actor) => write!(f, "voter {actor}"),
            Self::VoterId(id) => write!(f, "voter #{id}"),
            Self::Candidate(actor) => write!(f, "candidate {actor}"),
            Self::CandidateId(id) => write!(f, "candidate #{id}"),
        }
    }
}
