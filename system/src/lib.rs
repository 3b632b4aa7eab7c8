//! Franchise election system: wires the election components together.
//!
//! The orchestrator:
//! - Loads the deployment configuration from TOML
//! - Constructs the commission authority, both registries and the coordinator
//! - Performs the one-time registry links and seeds officers
//! - Wraps the main operations in named tracing spans

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod tracing_spans;

pub use bootstrap::{ElectionSystem, SystemEvent, SystemSummary};
pub use config::{OfficerSeed, SystemConfig};
pub use error::SystemError;
