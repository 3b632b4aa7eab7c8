//! The candidate registry and its operations.

use crate::candidate::{
    Candidate, CandidateApplication, CandidateId, CandidateStatistics, VoteShare,
};
use franchise_authority::CommissionAuthority;
use franchise_escrow::{Disposition, EscrowLedger, Settlement};
use franchise_types::shared::{self, Shared};
use franchise_types::{
    ActorId, Amount, ConstituencyId, ElectionError, ElectionParams, Linkage, RegistryKind, Role,
    Subject,
};
use std::collections::{BTreeMap, HashMap};

pub struct CandidateRegistry {
    /// Identity of this component on the substrate.
    id: ActorId,
    authority: Shared<CommissionAuthority>,
    authority_id: ActorId,
    params: ElectionParams,
    linkage: Linkage,
    candidates: BTreeMap<CandidateId, Candidate>,
    by_actor: HashMap<ActorId, CandidateId>,
    per_constituency: BTreeMap<ConstituencyId, u64>,
    escrow: EscrowLedger,
    next_id: CandidateId,
    /// Whether the post-declaration settlement has run.
    settled: bool,
}

impl CandidateRegistry {
    pub fn new(
        id: ActorId,
        authority: Shared<CommissionAuthority>,
        params: ElectionParams,
    ) -> Self {
        let authority_id = shared::read(&authority).id().clone();
        tracing::info!(registry = %id, authority = %authority_id, "candidate registry created");
        Self {
            id,
            authority,
            authority_id,
            params,
            linkage: Linkage::Unlinked,
            candidates: BTreeMap::new(),
            by_actor: HashMap::new(),
            per_constituency: BTreeMap::new(),
            escrow: EscrowLedger::new(),
            next_id: 1,
            settled: false,
        }
    }

    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// Register `application.actor` as a candidate, escrowing `transferred`.
    ///
    /// `transferred` is the value attached to the call and must equal the
    /// declared deposit exactly. On any failure nothing is escrowed.
    /// Registration closes once deposits have been settled.
    pub fn register_candidate(
        &mut self,
        caller: &ActorId,
        application: CandidateApplication,
        transferred: Amount,
    ) -> Result<&Candidate, ElectionError> {
        if self.settled {
            return Err(ElectionError::ResultsAlreadyDeclared);
        }
        if caller != &application.actor {
            return Err(ElectionError::PermissionDenied {
                actor: caller.clone(),
                required: Role::Subject,
            });
        }
        if self.by_actor.contains_key(&application.actor) {
            tracing::debug!(actor = %caller, "duplicate candidate registration rejected");
            return Err(ElectionError::AlreadyRegistered {
                actor: application.actor,
                registry: RegistryKind::Candidate,
            });
        }
        if transferred != application.deposit {
            tracing::debug!(actor = %caller, declared = %application.deposit, %transferred, "deposit mismatch");
            return Err(ElectionError::IncorrectDeposit {
                declared: application.deposit,
                transferred,
            });
        }
        if application.age < self.params.min_candidate_age {
            return Err(ElectionError::Ineligible {
                actor: application.actor,
                age: application.age,
                minimum: self.params.min_candidate_age,
            });
        }

        let id = self.next_id;
        self.escrow
            .hold(id, application.actor.clone(), transferred)?;

        let candidate = Candidate {
            id,
            actor: application.actor,
            name: application.name,
            party: application.party,
            deposit: application.deposit,
            age: application.age,
            constituency: application.constituency,
            registered: true,
            can_contest: false,
        };
        tracing::info!(
            candidate = %candidate.actor,
            id,
            party = %candidate.party,
            constituency = %candidate.constituency,
            deposit = %candidate.deposit,
            "candidate registered"
        );
        self.next_id += 1;
        self.by_actor.insert(candidate.actor.clone(), id);
        *self.per_constituency.entry(candidate.constituency).or_default() += 1;
        Ok(self.candidates.entry(id).or_insert(candidate))
    }

    /// Decide whether `candidate` may contest. The caller must be the officer
    /// of the candidate's constituency.
    pub fn verify_candidate(
        &mut self,
        caller: &ActorId,
        candidate: &ActorId,
        decision: bool,
    ) -> Result<&Candidate, ElectionError> {
        let officer = shared::read(&self.authority).require_officer(caller)?;
        let id = self.lookup(candidate)?;
        let record = self
            .candidates
            .get_mut(&id)
            .ok_or_else(|| ElectionError::NotFound(Subject::Candidate(candidate.clone())))?;
        if !officer.serves(record.constituency) {
            tracing::debug!(officer = %caller, candidate = %candidate, "cross-constituency verification rejected");
            return Err(ElectionError::ConstituencyMismatch {
                expected: officer.constituency,
                found: record.constituency,
            });
        }
        record.can_contest = decision;
        tracing::info!(officer = %caller, candidate = %candidate, decision, "candidate verification recorded");
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
        tracing::info!(registry = %self.id, coordinator = %coordinator, "candidate registry linked");
        Ok(())
    }

    /// Remove a candidate, refunding any deposit still in escrow.
    pub fn emergency_remove_candidate(
        &mut self,
        caller: &ActorId,
        candidate: &ActorId,
    ) -> Result<(Candidate, Option<Settlement>), ElectionError> {
        self.remove(caller, candidate, Disposition::Refund)
    }

    /// Remove a candidate for cause, forfeiting any deposit still in escrow.
    pub fn disqualify_candidate(
        &mut self,
        caller: &ActorId,
        candidate: &ActorId,
    ) -> Result<(Candidate, Option<Settlement>), ElectionError> {
        self.remove(caller, candidate, Disposition::Forfeit)
    }

    fn remove(
        &mut self,
        caller: &ActorId,
        candidate: &ActorId,
        disposition: Disposition,
    ) -> Result<(Candidate, Option<Settlement>), ElectionError> {
        shared::read(&self.authority).require_commissioner(caller)?;
        let id = self.lookup(candidate)?;
        let settlement = if self.escrow.is_held(id) {
            Some(self.escrow.release(id, disposition)?)
        } else {
            None
        };
        let removed = self
            .candidates
            .remove(&id)
            .ok_or_else(|| ElectionError::NotFound(Subject::Candidate(candidate.clone())))?;
        self.by_actor.remove(candidate);
        if let Some(count) = self.per_constituency.get_mut(&removed.constituency) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.per_constituency.remove(&removed.constituency);
            }
        }
        tracing::warn!(candidate = %candidate, id, by = %caller, ?disposition, "candidate removed by commissioner");
        Ok((removed, settlement))
    }

    /// Release every escrowed deposit after results are declared.
    ///
    /// Only the linked coordinator may call this, and only once. Candidates
    /// who never got to contest are refunded; contestants are refunded when
    /// their share of the constituency's votes meets the forfeiture
    /// threshold and forfeit otherwise. Candidates missing from `shares`
    /// received no votes.
    pub fn settle_deposits(
        &mut self,
        caller: &ActorId,
        shares: &[VoteShare],
    ) -> Result<Vec<Settlement>, ElectionError> {
        self.linkage.ensure_coordinator(caller)?;
        if self.settled {
            return Err(ElectionError::ResultsAlreadyDeclared);
        }

        let by_candidate: HashMap<&ActorId, &VoteShare> =
            shares.iter().map(|s| (&s.candidate, s)).collect();
        let plan: Vec<(CandidateId, Disposition)> = self
            .candidates
            .values()
            .filter(|c| self.escrow.is_held(c.id))
            .map(|c| {
                let keeps = match by_candidate.get(&c.actor) {
                    _ if !c.can_contest => true,
                    Some(share) => self.params.keeps_deposit(share.votes, share.constituency_total),
                    None => self.params.keeps_deposit(0, self.constituency_total(c.constituency, shares)),
                };
                let disposition = if keeps {
                    Disposition::Refund
                } else {
                    Disposition::Forfeit
                };
                (c.id, disposition)
            })
            .collect();

        let settlements = self.escrow.release_all(&plan)?;
        self.settled = true;
        tracing::info!(
            settled = settlements.len(),
            treasury = %self.escrow.treasury(),
            "candidate deposits settled"
        );
        Ok(settlements)
    }

    fn constituency_total(&self, constituency: ConstituencyId, shares: &[VoteShare]) -> u64 {
        shares
            .iter()
            .find(|s| {
                self.by_actor
                    .get(&s.candidate)
                    .and_then(|id| self.candidates.get(id))
                    .is_some_and(|c| c.constituency == constituency)
            })
            .map(|s| s.constituency_total)
            .unwrap_or(0)
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn candidate(&self, id: CandidateId) -> Result<&Candidate, ElectionError> {
        self.candidates
            .get(&id)
            .ok_or(ElectionError::NotFound(Subject::CandidateId(id)))
    }

    pub fn candidate_by_actor(&self, actor: &ActorId) -> Result<&Candidate, ElectionError> {
        let id = self.lookup(actor)?;
        self.candidate(id)
    }

    pub fn is_registered(&self, actor: &ActorId) -> bool {
        self.by_actor.contains_key(actor)
    }

    pub fn candidate_count(&self) -> u64 {
        self.candidates.len() as u64
    }

    pub fn statistics(&self) -> CandidateStatistics {
        CandidateStatistics {
            total_registered: self.candidate_count(),
            total_constituencies: self.per_constituency.len() as u64,
            total_contesting: self.candidates.values().filter(|c| c.can_contest).count() as u64,
            total_escrowed: self.escrow.total_held(),
        }
    }

    /// Candidates of `constituency` in registration order.
    pub fn candidates_by_constituency(&self, constituency: ConstituencyId) -> Vec<&Candidate> {
        self.candidates
            .values()
            .filter(|c| c.constituency == constituency)
            .collect()
    }

    /// All candidates in registration order.
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.values()
    }

    /// Deposit still held for `actor` (zero once released).
    pub fn escrowed_deposit(&self, actor: &ActorId) -> Result<Amount, ElectionError> {
        let id = self.lookup(actor)?;
        Ok(self.escrow.held(id))
    }

    pub fn total_escrowed(&self) -> Amount {
        self.escrow.total_held()
    }

    /// Forfeited deposits kept by the commission.
    pub fn treasury(&self) -> Amount {
        self.escrow.treasury()
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn general_election(&self) -> Option<&ActorId> {
        self.linkage.coordinator()
    }

    /// Identity of the commission authority this registry consults.
    pub fn authority_id(&self) -> &ActorId {
        &self.authority_id
    }

    fn lookup(&self, actor: &ActorId) -> Result<CandidateId, ElectionError> {
        self.by_actor
            .get(actor)
            .copied()
            .ok_or_else(|| ElectionError::NotFound(Subject::Candidate(actor.clone())))
    }
}
