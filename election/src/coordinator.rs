//! The election coordinator.

use crate::results::{ConstituencyResult, Declaration, ElectionResults, Phase, Standing};
use franchise_authority::CommissionAuthority;
use franchise_candidates::{CandidateId, CandidateRegistry};
use franchise_types::shared::{self, Shared};
use franchise_types::{ActorId, ConstituencyId, ElectionError, Timestamp};
use franchise_voters::VoterRegistry;
use std::collections::{BTreeMap, HashSet};

/// Audit records for the orchestrator to drain.
///
/// Ballot events carry the voter and constituency only, never the choice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElectionEvent {
    BallotCast {
        voter: ActorId,
        constituency: ConstituencyId,
    },
    ResultsDeclared {
        declared_by: ActorId,
        total_votes: u64,
    },
}

pub struct ElectionCoordinator {
    /// Identity of this component on the substrate.
    id: ActorId,
    candidates: Shared<CandidateRegistry>,
    voters: Shared<VoterRegistry>,
    authority: Shared<CommissionAuthority>,
    start: Timestamp,
    end: Timestamp,
    /// Ballots per candidate.
    ballots: BTreeMap<CandidateId, u64>,
    /// Every actor whose ballot was counted.
    voted: HashSet<ActorId>,
    votes_cast: u64,
    declaration: Option<Declaration>,
    pending_events: Vec<ElectionEvent>,
}

impl ElectionCoordinator {
    /// Create a coordinator for the window `[start, end)`.
    pub fn new(
        id: ActorId,
        candidates: Shared<CandidateRegistry>,
        voters: Shared<VoterRegistry>,
        authority: Shared<CommissionAuthority>,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Self, ElectionError> {
        if end <= start {
            return Err(ElectionError::InvalidElectionWindow { start, end });
        }
        tracing::info!(coordinator = %id, %start, %end, "election coordinator created");
        Ok(Self {
            id,
            candidates,
            voters,
            authority,
            start,
            end,
            ballots: BTreeMap::new(),
            voted: HashSet::new(),
            votes_cast: 0,
            declaration: None,
            pending_events: Vec::new(),
        })
    }

    pub fn id(&self) -> &ActorId {
        &self.id
    }

    pub fn election_start(&self) -> Timestamp {
        self.start
    }

    pub fn election_end(&self) -> Timestamp {
        self.end
    }

    pub fn is_open(&self, now: Timestamp) -> bool {
        self.start <= now && now < self.end
    }

    pub fn phase(&self, now: Timestamp) -> Phase {
        if self.declaration.is_some() {
            Phase::Declared
        } else if now < self.start {
            Phase::Pending
        } else if now < self.end {
            Phase::Open
        } else {
            Phase::Closed
        }
    }

    /// Cast the caller's ballot for `candidate`.
    ///
    /// The ballot is counted only after the voter registry has recorded the
    /// vote, so a rejected record leaves the tally untouched.
    pub fn cast_vote(
        &mut self,
        caller: &ActorId,
        candidate: &ActorId,
        now: Timestamp,
    ) -> Result<(), ElectionError> {
        if !self.is_open(now) {
            tracing::debug!(voter = %caller, %now, "ballot outside the voting window");
            return Err(self.window_violation(now));
        }
        if self.voted.contains(caller) {
            return Err(ElectionError::AlreadyVoted(caller.clone()));
        }

        let voter_constituency = {
            let voters = shared::read(&self.voters);
            let voter = voters.voter_by_actor(caller)?;
            if !voter.allowed_to_vote {
                return Err(ElectionError::NotAllowedToVote(caller.clone()));
            }
            if voter.has_voted {
                return Err(ElectionError::AlreadyVoted(caller.clone()));
            }
            voter.constituency
        };
        let candidate_id = {
            let candidates = shared::read(&self.candidates);
            let record = candidates.candidate_by_actor(candidate)?;
            if !record.can_contest {
                return Err(ElectionError::CannotContest(candidate.clone()));
            }
            if record.constituency != voter_constituency {
                return Err(ElectionError::ConstituencyMismatch {
                    expected: voter_constituency,
                    found: record.constituency,
                });
            }
            record.id
        };

        shared::write(&self.voters).record_vote(&self.id, caller)?;
        self.voted.insert(caller.clone());
        *self.ballots.entry(candidate_id).or_default() += 1;
        self.votes_cast += 1;
        tracing::info!(voter = %caller, constituency = %voter_constituency, "ballot cast");
        self.pending_events.push(ElectionEvent::BallotCast {
            voter: caller.clone(),
            constituency: voter_constituency,
        });
        Ok(())
    }

    /// Count the ballots. Only available once the window has closed.
    ///
    /// Standings cover every candidate who may contest, plus any candidate
    /// whose verification was revoked after receiving ballots. Ballots for
    /// removed candidates are not reported.
    pub fn tally(&self, now: Timestamp) -> Result<ElectionResults, ElectionError> {
        if now < self.end {
            return Err(self.window_violation(now));
        }
        let candidates = shared::read(&self.candidates);
        let mut by_constituency: BTreeMap<ConstituencyId, Vec<Standing>> = BTreeMap::new();
        for candidate in candidates.candidates() {
            let votes = self.ballots.get(&candidate.id).copied().unwrap_or(0);
            if !candidate.can_contest && votes == 0 {
                continue;
            }
            by_constituency
                .entry(candidate.constituency)
                .or_default()
                .push(Standing {
                    candidate: candidate.id,
                    actor: candidate.actor.clone(),
                    name: candidate.name.clone(),
                    party: candidate.party.clone(),
                    votes,
                });
        }

        let constituencies: Vec<_> = by_constituency
            .into_iter()
            .map(|(constituency, standings)| {
                ConstituencyResult::from_standings(constituency, standings)
            })
            .collect();
        let total_votes = constituencies.iter().map(|c| c.total_votes).sum();
        Ok(ElectionResults {
            constituencies,
            total_votes,
        })
    }

    /// Declare the results and settle candidate deposits. Commissioner only,
    /// after the window has closed, once.
    pub fn declare_results(
        &mut self,
        caller: &ActorId,
        now: Timestamp,
    ) -> Result<&Declaration, ElectionError> {
        shared::read(&self.authority).require_commissioner(caller)?;
        if self.declaration.is_some() {
            return Err(ElectionError::ResultsAlreadyDeclared);
        }
        let results = self.tally(now)?;
        let settlements =
            shared::write(&self.candidates).settle_deposits(&self.id, &results.vote_shares())?;

        tracing::info!(
            by = %caller,
            total_votes = results.total_votes,
            constituencies = results.constituencies.len(),
            settlements = settlements.len(),
            "election results declared"
        );
        self.pending_events.push(ElectionEvent::ResultsDeclared {
            declared_by: caller.clone(),
            total_votes: results.total_votes,
        });
        Ok(&*self.declaration.insert(Declaration {
            declared_at: now,
            declared_by: caller.clone(),
            results,
            settlements,
        }))
    }

    pub fn votes_cast(&self) -> u64 {
        self.votes_cast
    }

    /// Declared results, if any.
    pub fn results(&self) -> Option<&ElectionResults> {
        self.declaration.as_ref().map(|d| &d.results)
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    /// Take all audit records accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<ElectionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn window_violation(&self, now: Timestamp) -> ElectionError {
        ElectionError::TimeWindowViolation {
            now,
            start: self.start,
            end: self.end,
        }
    }
}
