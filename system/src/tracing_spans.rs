//! Pre-built [`tracing::Span`] constructors for election operations.
//!
//! Consistent span names and field sets make it easy to filter and
//! correlate one actor's operations across components.

use franchise_types::ActorId;
use tracing::{info_span, Span};

/// Span covering construction and wiring of the whole system.
pub fn bootstrap_span(coordinator: &ActorId) -> Span {
    info_span!("bootstrap", coordinator = %coordinator)
}

/// Span covering a self-service registration in either registry.
pub fn registration_span(registry: &ActorId, actor: &ActorId) -> Span {
    info_span!("registration", registry = %registry, actor = %actor)
}

/// Span covering an officer's verification decision.
pub fn verification_span(officer: &ActorId, subject: &ActorId) -> Span {
    info_span!("verification", officer = %officer, subject = %subject)
}

/// Span covering a single ballot. The chosen candidate is not recorded.
pub fn ballot_span(voter: &ActorId) -> Span {
    info_span!("ballot", voter = %voter)
}

/// Span covering result declaration and deposit settlement.
pub fn declaration_span(coordinator: &ActorId) -> Span {
    info_span!("declaration", coordinator = %coordinator)
}
