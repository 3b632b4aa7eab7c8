//! One-time registry → coordinator wiring.

use serde::{Deserialize, Serialize};

use crate::actor::ActorId;
use crate::error::ElectionError;
use crate::role::Role;

/// Whether a registry has been bound to its election coordinator.
///
/// The only transition is `Unlinked → Linked`, performed by [`Linkage::link`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Linkage {
    #[default]
    Unlinked,
    Linked(ActorId),
}

impl Linkage {
    /// Bind to `coordinator`. Fails with `AlreadyLinked` if already bound,
    /// leaving the existing link in place.
    pub fn link(&mut self, coordinator: ActorId) -> Result<(), ElectionError> {
        match self {
            Self::Linked(existing) => Err(ElectionError::AlreadyLinked {
                coordinator: existing.clone(),
            }),
            Self::Unlinked => {
                *self = Self::Linked(coordinator);
                Ok(())
            }
        }
    }

    pub fn coordinator(&self) -> Option<&ActorId> {
        match self {
            Self::Linked(id) => Some(id),
            Self::Unlinked => None,
        }
    }

    pub fn is_linked(&self) -> bool {
        matches!(self, Self::Linked(_))
    }

    /// Check that `caller` is the linked coordinator.
    pub fn ensure_coordinator(&self, caller: &ActorId) -> Result<(), ElectionError> {
        match self {
            Self::Unlinked => Err(ElectionError::NotLinked),
            Self::Linked(id) if id == caller => Ok(()),
            Self::Linked(_) => Err(ElectionError::PermissionDenied {
                actor: caller.clone(),
                required: Role::Coordinator,
            }),
        }
    }
}
