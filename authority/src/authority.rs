//! Commissioner identity, officer roster, and the authorization check.

use crate::officer::Officer;
use franchise_types::{ActorId, ConstituencyId, DuplicateOfficer, ElectionError, Role, Subject};
use std::collections::HashMap;

/// Role an operation requires of its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Commissioner,
    Officer,
}

/// Role granted by a successful authorization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Grant {
    Commissioner,
    Officer(Officer),
}

/// Audit records for the orchestrator to drain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthorityEvent {
    OfficerAppointed {
        officer: ActorId,
        constituency: ConstituencyId,
        appointed_by: ActorId,
    },
}

/// The commission authority.
#[derive(Debug)]
pub struct CommissionAuthority {
    /// Identity of this component on the substrate.
    id: ActorId,
    commissioner: ActorId,
    officers: HashMap<ActorId, Officer>,
    /// Reverse index: constituency → its officer.
    by_constituency: HashMap<ConstituencyId, ActorId>,
    /// Officers in appointment order.
    roster: Vec<ActorId>,
    pending_events: Vec<AuthorityEvent>,
}

impl CommissionAuthority {
    /// Bootstrap the authority with the deploying actor as commissioner.
    pub fn new(id: ActorId, commissioner: ActorId) -> Self {
        tracing::info!(authority = %id, commissioner = %commissioner, "commission authority created");
        Self {
            id,
            commissioner,
            officers: HashMap::new(),
            by_constituency: HashMap::new(),
            roster: Vec::new(),
            pending_events: Vec::new(),
        }
    }

    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// Check that `caller` holds the role `requirement` names.
    pub fn authorize(
        &self,
        caller: &ActorId,
        requirement: Requirement,
    ) -> Result<Grant, ElectionError> {
        match requirement {
            Requirement::Commissioner if self.is_commissioner(caller) => Ok(Grant::Commissioner),
            Requirement::Commissioner => Err(ElectionError::PermissionDenied {
                actor: caller.clone(),
                required: Role::Commissioner,
            }),
            Requirement::Officer => self
                .officers
                .get(caller)
                .cloned()
                .map(Grant::Officer)
                .ok_or_else(|| ElectionError::PermissionDenied {
                    actor: caller.clone(),
                    required: Role::Officer,
                }),
        }
    }

    /// Shorthand for [`authorize`](Self::authorize) with the commissioner requirement.
    pub fn require_commissioner(&self, caller: &ActorId) -> Result<(), ElectionError> {
        self.authorize(caller, Requirement::Commissioner).map(|_| ())
    }

    /// Shorthand for [`authorize`](Self::authorize) with the officer
    /// requirement, returning the caller's officer record.
    pub fn require_officer(&self, caller: &ActorId) -> Result<Officer, ElectionError> {
        match self.authorize(caller, Requirement::Officer)? {
            Grant::Officer(officer) => Ok(officer),
            Grant::Commissioner => Err(ElectionError::PermissionDenied {
                actor: caller.clone(),
                required: Role::Officer,
            }),
        }
    }

    /// Appoint `actor` as the officer for `constituency`.
    ///
    /// Re-appointment is rejected: an actor serves one constituency and a
    /// constituency has one officer.
    pub fn appoint_officer(
        &mut self,
        caller: &ActorId,
        actor: ActorId,
        name: impl Into<String>,
        constituency: ConstituencyId,
    ) -> Result<&Officer, ElectionError> {
        self.require_commissioner(caller)?;
        if self.officers.contains_key(&actor) {
            return Err(ElectionError::DuplicateOfficer(DuplicateOfficer::Actor(actor)));
        }
        if let Some(incumbent) = self.by_constituency.get(&constituency) {
            return Err(ElectionError::DuplicateOfficer(
                DuplicateOfficer::Constituency {
                    constituency,
                    incumbent: incumbent.clone(),
                },
            ));
        }

        let officer = Officer {
            actor: actor.clone(),
            name: name.into(),
            constituency,
        };
        tracing::info!(officer = %actor, name = %officer.name, %constituency, "officer appointed");
        self.by_constituency.insert(constituency, actor.clone());
        self.roster.push(actor.clone());
        self.pending_events.push(AuthorityEvent::OfficerAppointed {
            officer: actor.clone(),
            constituency,
            appointed_by: caller.clone(),
        });
        Ok(self.officers.entry(actor).or_insert(officer))
    }

    pub fn is_officer(&self, actor: &ActorId) -> bool {
        self.officers.contains_key(actor)
    }

    pub fn is_commissioner(&self, actor: &ActorId) -> bool {
        &self.commissioner == actor
    }

    pub fn officer(&self, actor: &ActorId) -> Result<&Officer, ElectionError> {
        self.officers
            .get(actor)
            .ok_or_else(|| ElectionError::NotFound(Subject::Officer(actor.clone())))
    }

    pub fn commissioner(&self) -> &ActorId {
        &self.commissioner
    }

    pub fn officer_for_constituency(&self, constituency: ConstituencyId) -> Option<&Officer> {
        self.by_constituency
            .get(&constituency)
            .and_then(|actor| self.officers.get(actor))
    }

    /// All officers in appointment order.
    pub fn officers(&self) -> Vec<&Officer> {
        self.roster
            .iter()
            .filter_map(|actor| self.officers.get(actor))
            .collect()
    }

    pub fn officer_count(&self) -> usize {
        self.officers.len()
    }

    /// Take all audit records accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<AuthorityEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
