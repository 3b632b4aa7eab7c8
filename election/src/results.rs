//! Election phases and tally records.

use franchise_candidates::{CandidateId, VoteShare};
use franchise_escrow::Settlement;
use franchise_types::{ActorId, ConstituencyId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the election stands relative to its window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Before `start`.
    Pending,
    /// Inside `[start, end)`; ballots are accepted.
    Open,
    /// At or after `end`, results not yet declared.
    Closed,
    /// Results declared and deposits settled.
    Declared,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Declared => write!(f, "declared"),
        }
    }
}

/// One candidate's line in a constituency result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub candidate: CandidateId,
    pub actor: ActorId,
    pub name: String,
    pub party: String,
    pub votes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstituencyResult {
    pub constituency: ConstituencyId,
    pub total_votes: u64,
    /// Ordered by votes descending, then candidate id ascending.
    pub standings: Vec<Standing>,
    /// `None` when no votes were cast or the top is tied.
    pub winner: Option<ActorId>,
}

impl ConstituencyResult {
    pub(crate) fn from_standings(constituency: ConstituencyId, mut standings: Vec<Standing>) -> Self {
        standings.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.candidate.cmp(&b.candidate)));
        let total_votes = standings.iter().map(|s| s.votes).sum();
        let winner = match standings.as_slice() {
            [first, second, ..] if first.votes == second.votes => None,
            [first, ..] if first.votes > 0 => Some(first.actor.clone()),
            _ => None,
        };
        Self {
            constituency,
            total_votes,
            standings,
            winner,
        }
    }

    /// Vote shares for deposit settlement.
    pub fn vote_shares(&self) -> impl Iterator<Item = VoteShare> + '_ {
        self.standings.iter().map(|s| VoteShare {
            candidate: s.actor.clone(),
            votes: s.votes,
            constituency_total: self.total_votes,
        })
    }
}

/// A full tally across constituencies, in constituency order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionResults {
    pub constituencies: Vec<ConstituencyResult>,
    pub total_votes: u64,
}

impl ElectionResults {
    pub fn constituency(&self, constituency: ConstituencyId) -> Option<&ConstituencyResult> {
        self.constituencies
            .iter()
            .find(|r| r.constituency == constituency)
    }

    pub fn winner(&self, constituency: ConstituencyId) -> Option<&ActorId> {
        self.constituency(constituency)
            .and_then(|r| r.winner.as_ref())
    }

    pub fn vote_shares(&self) -> Vec<VoteShare> {
        self.constituencies
            .iter()
            .flat_map(ConstituencyResult::vote_shares)
            .collect()
    }
}

/// Declared results together with the deposit settlements they triggered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub declared_at: Timestamp,
    pub declared_by: ActorId,
    pub results: ElectionResults,
    pub settlements: Vec<Settlement>,
}
