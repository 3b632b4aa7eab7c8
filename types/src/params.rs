//! Election parameters configured at bootstrap.

use serde::{Deserialize, Serialize};

/// Basis-point denominator (10_000 = 100%).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Tunable eligibility and settlement rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionParams {
    /// Minimum age at voter registration.
    #[serde(default = "default_min_voter_age")]
    pub min_voter_age: u32,

    /// Minimum age at candidate registration.
    #[serde(default = "default_min_candidate_age")]
    pub min_candidate_age: u32,

    /// Share of its constituency's votes (basis points) a candidate needs
    /// to have the security deposit refunded at settlement.
    /// Default: 1666 (just under one sixth).
    #[serde(default = "default_forfeiture_threshold_bps")]
    pub deposit_forfeiture_threshold_bps: u32,
}

fn default_min_voter_age() -> u32 {
    18
}

fn default_min_candidate_age() -> u32 {
    25
}

fn default_forfeiture_threshold_bps() -> u32 {
    1666
}

impl Default for ElectionParams {
    fn default() -> Self {
        Self {
            min_voter_age: default_min_voter_age(),
            min_candidate_age: default_min_candidate_age(),
            deposit_forfeiture_threshold_bps: default_forfeiture_threshold_bps(),
        }
    }
}

impl ElectionParams {
    /// Whether `votes` out of `total` meets the deposit refund threshold.
    ///
    /// A constituency where nobody voted refunds every deposit.
    pub fn keeps_deposit(&self, votes: u64, total: u64) -> bool {
        if total == 0 {
            return true;
        }
        (votes as u128) * BPS_DENOMINATOR
            >= (total as u128) * self.deposit_forfeiture_threshold_bps as u128
    }
}
