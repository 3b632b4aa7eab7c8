//! Bootstrap orchestration: builds the components in dependency order,
//! links both registries to the coordinator, and seeds officers.

use crate::config::SystemConfig;
use crate::tracing_spans;
use crate::SystemError;
use franchise_authority::{AuthorityEvent, CommissionAuthority};
use franchise_candidates::{CandidateApplication, CandidateRegistry, CandidateStatistics};
use franchise_election::{Declaration, ElectionCoordinator, ElectionEvent, Phase};
use franchise_types::shared::{self, Shared};
use franchise_types::{
    ActorId, Amount, ConstituencyId, ElectionError, ElectionParams, NationalIdHash, Timestamp,
    VoterCode,
};
use franchise_voters::{VoterRegistry, VoterStatistics};
use serde::{Deserialize, Serialize};

/// Audit records drained from every component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SystemEvent {
    Authority(AuthorityEvent),
    Election(ElectionEvent),
}

/// Snapshot of a deployed system, suitable for printing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSummary {
    pub commissioner: ActorId,
    pub authority: ActorId,
    pub voter_registry: ActorId,
    pub candidate_registry: ActorId,
    pub coordinator: ActorId,
    pub election_start: Timestamp,
    pub election_end: Timestamp,
    pub phase: Phase,
    pub officers: Vec<(ActorId, ConstituencyId)>,
    pub voters: VoterStatistics,
    pub candidates: CandidateStatistics,
    pub votes_cast: u64,
    pub treasury: Amount,
    pub params: ElectionParams,
}

/// The four election components, wired together.
///
/// Handles are shared so callers may also reach a component directly. Lock
/// order is coordinator, then registries, then authority.
pub struct ElectionSystem {
    authority: Shared<CommissionAuthority>,
    voters: Shared<VoterRegistry>,
    candidates: Shared<CandidateRegistry>,
    coordinator: Shared<ElectionCoordinator>,
    params: ElectionParams,
}

impl ElectionSystem {
    /// Construct and wire every component from `config`.
    ///
    /// Order: authority, both registries, coordinator, the two one-time
    /// links, then officer seeding. Any failure aborts the whole bootstrap.
    pub fn bootstrap(config: &SystemConfig) -> Result<Self, SystemError> {
        config.validate()?;
        let _span = tracing_spans::bootstrap_span(&config.coordinator_id).entered();

        let authority = shared::shared(CommissionAuthority::new(
            config.authority_id.clone(),
            config.commissioner.clone(),
        ));
        let voters = shared::shared(VoterRegistry::new(
            config.voter_registry_id.clone(),
            authority.clone(),
            config.params.clone(),
        ));
        let candidates = shared::shared(CandidateRegistry::new(
            config.candidate_registry_id.clone(),
            authority.clone(),
            config.params.clone(),
        ));
        let coordinator = ElectionCoordinator::new(
            config.coordinator_id.clone(),
            candidates.clone(),
            voters.clone(),
            authority.clone(),
            config.election_start,
            config.election_end,
        )?;

        shared::write(&voters)
            .set_general_election(&config.commissioner, config.coordinator_id.clone())?;
        shared::write(&candidates)
            .set_general_election(&config.commissioner, config.coordinator_id.clone())?;

        {
            let mut authority = shared::write(&authority);
            for seed in &config.officers {
                authority.appoint_officer(
                    &config.commissioner,
                    seed.actor.clone(),
                    seed.name.clone(),
                    seed.constituency,
                )?;
            }
        }

        tracing::info!(
            officers = config.officers.len(),
            start = %config.election_start,
            end = %config.election_end,
            "election system bootstrapped"
        );
        Ok(Self {
            authority,
            voters,
            candidates,
            coordinator: shared::shared(coordinator),
            params: config.params.clone(),
        })
    }

    pub fn authority(&self) -> &Shared<CommissionAuthority> {
        &self.authority
    }

    pub fn voters(&self) -> &Shared<VoterRegistry> {
        &self.voters
    }

    pub fn candidates(&self) -> &Shared<CandidateRegistry> {
        &self.candidates
    }

    pub fn coordinator(&self) -> &Shared<ElectionCoordinator> {
        &self.coordinator
    }

    // ── Traced operations ──────────────────────────────────────────────

    pub fn appoint_officer(
        &self,
        caller: &ActorId,
        actor: ActorId,
        name: &str,
        constituency: ConstituencyId,
    ) -> Result<(), ElectionError> {
        shared::write(&self.authority)
            .appoint_officer(caller, actor, name, constituency)
            .map(|_| ())
    }

    pub fn register_voter(
        &self,
        caller: &ActorId,
        name: &str,
        age: u32,
        national_id: NationalIdHash,
        voter_code: VoterCode,
        constituency: ConstituencyId,
    ) -> Result<(), ElectionError> {
        let mut voters = shared::write(&self.voters);
        let _span = tracing_spans::registration_span(voters.id(), caller).entered();
        voters
            .register_as_voter(caller, name, age, national_id, voter_code, constituency)
            .map(|_| ())
    }

    pub fn verify_voter(
        &self,
        caller: &ActorId,
        voter: &ActorId,
        national_id: &NationalIdHash,
        voter_code: &VoterCode,
        decision: bool,
    ) -> Result<(), ElectionError> {
        let _span = tracing_spans::verification_span(caller, voter).entered();
        shared::write(&self.voters)
            .verify_voter(caller, voter, national_id, voter_code, decision)
            .map(|_| ())
    }

    pub fn register_candidate(
        &self,
        application: CandidateApplication,
        transferred: Amount,
    ) -> Result<(), ElectionError> {
        let mut candidates = shared::write(&self.candidates);
        let caller = application.actor.clone();
        let _span = tracing_spans::registration_span(candidates.id(), &caller).entered();
        candidates
            .register_candidate(&caller, application, transferred)
            .map(|_| ())
    }

    pub fn verify_candidate(
        &self,
        caller: &ActorId,
        candidate: &ActorId,
        decision: bool,
    ) -> Result<(), ElectionError> {
        let _span = tracing_spans::verification_span(caller, candidate).entered();
        shared::write(&self.candidates)
            .verify_candidate(caller, candidate, decision)
            .map(|_| ())
    }

    pub fn cast_vote(
        &self,
        caller: &ActorId,
        candidate: &ActorId,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        let _span = tracing_spans::ballot_span(caller).entered();
        shared::write(&self.coordinator).cast_vote(caller, candidate, now)
    }

    pub fn declare_results(
        &self,
        caller: &ActorId,
        now: Timestamp,
    ) -> Result<Declaration, ElectionError> {
        let mut coordinator = shared::write(&self.coordinator);
        let _span = tracing_spans::declaration_span(coordinator.id()).entered();
        coordinator.declare_results(caller, now).cloned()
    }

    /// Take the audit records of every component, authority first.
    pub fn drain_events(&self) -> Vec<SystemEvent> {
        let mut coordinator = shared::write(&self.coordinator);
        let mut authority = shared::write(&self.authority);
        authority
            .drain_events()
            .into_iter()
            .map(SystemEvent::Authority)
            .chain(coordinator.drain_events().into_iter().map(SystemEvent::Election))
            .collect()
    }

    pub fn summary(&self, now: Timestamp) -> SystemSummary {
        let coordinator = shared::read(&self.coordinator);
        let voters = shared::read(&self.voters);
        let candidates = shared::read(&self.candidates);
        let authority = shared::read(&self.authority);
        SystemSummary {
            commissioner: authority.commissioner().clone(),
            authority: authority.id().clone(),
            voter_registry: voters.id().clone(),
            candidate_registry: candidates.id().clone(),
            coordinator: coordinator.id().clone(),
            election_start: coordinator.election_start(),
            election_end: coordinator.election_end(),
            phase: coordinator.phase(now),
            officers: authority
                .officers()
                .into_iter()
                .map(|o| (o.actor.clone(), o.constituency))
                .collect(),
            voters: voters.statistics(),
            candidates: candidates.statistics(),
            votes_cast: coordinator.votes_cast(),
            treasury: candidates.treasury(),
            params: self.params.clone(),
        }
    }
}
