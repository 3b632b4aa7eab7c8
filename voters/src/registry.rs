//! The voter registry and its operations.

use crate::voter::{Voter, VoterId, VoterStatistics};
use franchise_authority::CommissionAuthority;
use franchise_types::shared::{self, Shared};
use franchise_types::{
    ActorId, ConstituencyId, Credential, ElectionError, ElectionParams, Linkage,
    NationalIdHash, RegistryKind, Subject, VoterCode,
};
use std::collections::{BTreeMap, HashMap, HashSet};

pub struct VoterRegistry {
    /// Identity of this component on the substrate.
    id: ActorId,
    authority: Shared<CommissionAuthority>,
    authority_id: ActorId,
    params: ElectionParams,
    linkage: Linkage,
    voters: BTreeMap<VoterId, Voter>,
    by_actor: HashMap<ActorId, VoterId>,
    /// Registered voters per constituency; entries drop out at zero.
    per_constituency: BTreeMap<ConstituencyId, u64>,
    /// Actors whose vote has been recorded. Removal never clears an entry.
    voted: HashSet<ActorId>,
    next_id: VoterId,
}

impl VoterRegistry {
    pub fn new(
        id: ActorId,
        authority: Shared<CommissionAuthority>,
        params: ElectionParams,
    ) -> Self {
        let authority_id = shared::read(&authority).id().clone();
        tracing::info!(registry = %id, authority = %authority_id, "voter registry created");
        Self {
            id,
            authority,
            authority_id,
            params,
            linkage: Linkage::Unlinked,
            voters: BTreeMap::new(),
            by_actor: HashMap::new(),
            per_constituency: BTreeMap::new(),
            voted: HashSet::new(),
            next_id: 1,
        }
    }

    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// Register the caller as a voter. The new record is not yet allowed to vote.
    ///
    /// An actor who voted under an earlier, since removed, record registers
    /// with `has_voted` already set.
    pub fn register_as_voter(
        &mut self,
        caller: &ActorId,
        name: impl Into<String>,
        age: u32,
        national_id: NationalIdHash,
        voter_code: VoterCode,
        constituency: ConstituencyId,
    ) -> Result<&Voter, ElectionError> {
        if self.by_actor.contains_key(caller) {
            tracing::debug!(actor = %caller, "duplicate voter registration rejected");
            return Err(ElectionError::AlreadyRegistered {
                actor: caller.clone(),
                registry: RegistryKind::Voter,
            });
        }
        if age < self.params.min_voter_age {
            return Err(ElectionError::Ineligible {
                actor: caller.clone(),
                age,
                minimum: self.params.min_voter_age,
            });
        }

        let id = self.next_id;
        let voter = Voter {
            id,
            actor: caller.clone(),
            name: name.into(),
            age,
            national_id,
            voter_code,
            constituency,
            registered: true,
            allowed_to_vote: false,
            has_voted: self.voted.contains(caller),
        };
        tracing::info!(voter = %caller, id, %constituency, "voter registered");
        self.next_id += 1;
        self.by_actor.insert(caller.clone(), id);
        *self.per_constituency.entry(constituency).or_default() += 1;
        Ok(self.voters.entry(id).or_insert(voter))
    }

    /// Set `voter`'s eligibility after checking the presented credentials.
    ///
    /// The caller must be the officer of the voter's constituency. A
    /// `decision` of `false` revokes an earlier grant, unless the voter has
    /// already voted.
    pub fn verify_voter(
        &mut self,
        caller: &ActorId,
        voter: &ActorId,
        national_id: &NationalIdHash,
        voter_code: &VoterCode,
        decision: bool,
    ) -> Result<&Voter, ElectionError> {
        let officer = shared::read(&self.authority).require_officer(caller)?;
        let id = self.lookup(voter)?;
        let record = self
            .voters
            .get_mut(&id)
            .ok_or_else(|| ElectionError::NotFound(Subject::Voter(voter.clone())))?;

        if !officer.serves(record.constituency) {
            tracing::debug!(officer = %caller, voter = %voter, "cross-constituency verification rejected");
            return Err(ElectionError::ConstituencyMismatch {
                expected: officer.constituency,
                found: record.constituency,
            });
        }
        if &record.national_id != national_id {
            return Err(ElectionError::CredentialMismatch(Credential::NationalId));
        }
        if &record.voter_code != voter_code {
            return Err(ElectionError::CredentialMismatch(Credential::VoterCode));
        }
        if record.has_voted && !decision {
            tracing::debug!(officer = %caller, voter = %voter, "revocation after voting rejected");
            return Err(ElectionError::AlreadyVoted(voter.clone()));
        }

        record.allowed_to_vote = decision;
        tracing::info!(officer = %caller, voter = %voter, decision, "voter verification recorded");
        Ok(record)
    }

    /// Bind this registry to its election coordinator, once.
    pub fn set_general_election(
        &mut self,
        caller: &ActorId,
        coordinator: ActorId,
    ) -> Result<(), ElectionError> {
        shared::read(&self.authority).require_commissioner(caller)?;
        self.linkage.link(coordinator.clone())?;
        tracing::info!(registry = %self.id, coordinator = %coordinator, "voter registry linked");
        Ok(())
    }

    /// Hard-remove a voter record. Whether the actor voted is kept.
    pub fn emergency_remove_voter(
        &mut self,
        caller: &ActorId,
        voter: &ActorId,
    ) -> Result<Voter, ElectionError> {
        shared::read(&self.authority).require_commissioner(caller)?;
        let id = self.lookup(voter)?;
        let removed = self
            .voters
            .remove(&id)
            .ok_or_else(|| ElectionError::NotFound(Subject::Voter(voter.clone())))?;
        self.by_actor.remove(voter);
        if let Some(count) = self.per_constituency.get_mut(&removed.constituency) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.per_constituency.remove(&removed.constituency);
            }
        }
        tracing::warn!(voter = %voter, id, by = %caller, "voter removed by commissioner");
        Ok(removed)
    }

    /// Mark `voter` as having voted. Only the linked coordinator may call this.
    pub fn record_vote(
        &mut self,
        caller: &ActorId,
        voter: &ActorId,
    ) -> Result<&Voter, ElectionError> {
        self.linkage.ensure_coordinator(caller)?;
        let id = self.lookup(voter)?;
        let record = self
            .voters
            .get_mut(&id)
            .ok_or_else(|| ElectionError::NotFound(Subject::Voter(voter.clone())))?;
        if !record.allowed_to_vote {
            return Err(ElectionError::NotAllowedToVote(voter.clone()));
        }
        if record.has_voted || self.voted.contains(voter) {
            return Err(ElectionError::AlreadyVoted(voter.clone()));
        }
        record.has_voted = true;
        self.voted.insert(voter.clone());
        Ok(record)
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn voter(&self, id: VoterId) -> Result<&Voter, ElectionError> {
        self.voters
            .get(&id)
            .ok_or(ElectionError::NotFound(Subject::VoterId(id)))
    }

    pub fn voter_by_actor(&self, actor: &ActorId) -> Result<&Voter, ElectionError> {
        let id = self.lookup(actor)?;
        self.voter(id)
    }

    pub fn is_registered(&self, actor: &ActorId) -> bool {
        self.by_actor.contains_key(actor)
    }

    /// Whether a vote was ever recorded for `actor`, including under a
    /// removed record.
    pub fn has_voted(&self, actor: &ActorId) -> bool {
        self.voted.contains(actor)
    }

    pub fn voter_count(&self) -> u64 {
        self.voters.len() as u64
    }

    pub fn statistics(&self) -> VoterStatistics {
        VoterStatistics {
            total_registered: self.voter_count(),
            total_constituencies: self.per_constituency.len() as u64,
            total_verified: self.voters.values().filter(|v| v.allowed_to_vote).count() as u64,
        }
    }

    /// Voters of `constituency` in registration order.
    pub fn voters_by_constituency(&self, constituency: ConstituencyId) -> Vec<&Voter> {
        self.voters
            .values()
            .filter(|v| v.constituency == constituency)
            .collect()
    }

    pub fn general_election(&self) -> Option<&ActorId> {
        self.linkage.coordinator()
    }

    /// Identity of the commission authority this registry consults.
    pub fn authority_id(&self) -> &ActorId {
        &self.authority_id
    }

    fn lookup(&self, actor: &ActorId) -> Result<VoterId, ElectionError> {
        self.by_actor
            .get(actor)
            .copied()
            .ok_or_else(|| ElectionError::NotFound(Subject::Voter(actor.clone())))
    }
}
