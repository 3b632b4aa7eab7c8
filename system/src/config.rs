//! System configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use franchise_types::{ActorId, ConstituencyId, ElectionParams, Timestamp};
use franchise_utils::LogFormat;

use crate::SystemError;

/// An officer appointed by the commissioner during bootstrap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerSeed {
    pub actor: ActorId,
    pub name: String,
    pub constituency: ConstituencyId,
}

/// Configuration for an election deployment.
///
/// Can be loaded from a TOML file via [`SystemConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemConfig {
    /// The deploying actor; becomes the commissioner.
    #[serde(default = "default_commissioner")]
    pub commissioner: ActorId,

    #[serde(default = "default_authority_id")]
    pub authority_id: ActorId,

    #[serde(default = "default_voter_registry_id")]
    pub voter_registry_id: ActorId,

    #[serde(default = "default_candidate_registry_id")]
    pub candidate_registry_id: ActorId,

    #[serde(default = "default_coordinator_id")]
    pub coordinator_id: ActorId,

    /// Opening of the voting window (inclusive), Unix seconds.
    #[serde(default = "default_election_start")]
    pub election_start: Timestamp,

    /// Close of the voting window (exclusive), Unix seconds.
    #[serde(default = "default_election_end")]
    pub election_end: Timestamp,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub params: ElectionParams,

    /// Officers appointed right after the registries are linked.
    #[serde(default)]
    pub officers: Vec<OfficerSeed>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_commissioner() -> ActorId {
    ActorId::new("commissioner")
}

fn default_authority_id() -> ActorId {
    ActorId::new("commission-authority")
}

fn default_voter_registry_id() -> ActorId {
    ActorId::new("voter-registry")
}

fn default_candidate_registry_id() -> ActorId {
    ActorId::new("candidate-registry")
}

fn default_coordinator_id() -> ActorId {
    ActorId::new("general-election")
}

fn default_election_start() -> Timestamp {
    Timestamp::EPOCH
}

/// One week after the epoch.
fn default_election_end() -> Timestamp {
    Timestamp::new(7 * 24 * 60 * 60)
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl SystemConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SystemError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SystemError> {
        toml::from_str(s).map_err(|e| SystemError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, SystemError> {
        toml::to_string_pretty(self).map_err(|e| SystemError::Config(e.to_string()))
    }

    /// Reject configurations that cannot bootstrap.
    ///
    /// Officer seeds are checked for duplicates here so a bad file fails
    /// before any component exists.
    pub fn validate(&self) -> Result<(), SystemError> {
        let ids = [
            &self.commissioner,
            &self.authority_id,
            &self.voter_registry_id,
            &self.candidate_registry_id,
            &self.coordinator_id,
        ];
        for id in ids {
            ActorId::parse(id.as_str()).map_err(|e| SystemError::Config(e.to_string()))?;
        }
        let components: HashSet<_> = ids[1..].iter().collect();
        if components.len() != ids.len() - 1 {
            return Err(SystemError::Config(
                "component identities must be distinct".into(),
            ));
        }
        if self.election_end <= self.election_start {
            return Err(SystemError::Config(format!(
                "election_end {} must be after election_start {}",
                self.election_end, self.election_start
            )));
        }
        if self.params.deposit_forfeiture_threshold_bps > 10_000 {
            return Err(SystemError::Config(format!(
                "deposit_forfeiture_threshold_bps {} exceeds 10000",
                self.params.deposit_forfeiture_threshold_bps
            )));
        }

        let mut actors = HashSet::new();
        let mut constituencies = HashSet::new();
        for seed in &self.officers {
            if !actors.insert(&seed.actor) {
                return Err(SystemError::Config(format!(
                    "officer {} is seeded twice",
                    seed.actor
                )));
            }
            if !constituencies.insert(seed.constituency) {
                return Err(SystemError::Config(format!(
                    "{} has more than one seeded officer",
                    seed.constituency
                )));
            }
        }
        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            commissioner: default_commissioner(),
            authority_id: default_authority_id(),
            voter_registry_id: default_voter_registry_id(),
            candidate_registry_id: default_candidate_registry_id(),
            coordinator_id: default_coordinator_id(),
            election_start: default_election_start(),
            election_end: default_election_end(),
            params: ElectionParams::default(),
            officers: Vec::new(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = SystemConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        let parsed = SystemConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.election_end, config.election_end);
        assert_eq!(parsed.params, config.params);
        assert_eq!(parsed.coordinator_id, config.coordinator_id);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = SystemConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.commissioner, ActorId::new("commissioner"));
        assert_eq!(config.params.min_voter_age, 18);
        assert_eq!(config.log_format, LogFormat::Human);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            commissioner = "owner"
            election_start = 100
            election_end = 200
            log_format = "json"

            [params]
            min_candidate_age = 30

            [[officers]]
            actor = "officer1"
            name = "Officer 1"
            constituency = 1
        "#;
        let config = SystemConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.commissioner, ActorId::new("owner"));
        assert_eq!(config.election_start, Timestamp::new(100));
        assert_eq!(config.params.min_candidate_age, 30);
        assert_eq!(config.params.min_voter_age, 18); // default
        assert_eq!(config.officers[0].constituency, ConstituencyId::new(1));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn inverted_window_fails_validation() {
        let config = SystemConfig {
            election_start: Timestamp::new(10),
            election_end: Timestamp::new(10),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SystemError::Config(_))));
    }

    #[test]
    fn duplicate_officer_seed_fails_validation() {
        let seed = |actor: &str, c: u32| OfficerSeed {
            actor: ActorId::new(actor),
            name: actor.to_string(),
            constituency: ConstituencyId::new(c),
        };
        let mut config = SystemConfig {
            officers: vec![seed("officer1", 1), seed("officer1", 2)],
            ..Default::default()
        };
        assert!(config.validate().is_err());
        config.officers = vec![seed("officer1", 1), seed("officer2", 1)];
        assert!(config.validate().is_err());
        config.officers = vec![seed("officer1", 1), seed("officer2", 2)];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_returns_io_error() {
        let result = SystemConfig::from_toml_file("/nonexistent/franchise.toml");
        assert!(matches!(result, Err(SystemError::Io(_))));
    }
}
