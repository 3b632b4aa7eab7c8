//! Fundamental types for the franchise election core.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! actor identities, constituencies, amounts, timestamps, credentials, the
//! registry linkage state, election parameters, and the shared error taxonomy.

pub mod actor;
pub mod amount;
pub mod credential;
pub mod error;
pub mod linkage;
pub mod params;
pub mod role;
pub mod shared;
pub mod time;

pub use actor::{ActorId, ConstituencyId};
pub use amount::Amount;
pub use credential::{Credential, NationalIdHash, VoterCode, NATIONAL_ID_LEN};
pub use error::{DuplicateOfficer, ElectionError, EscrowError, Subject};
pub use linkage::Linkage;
pub use params::ElectionParams;
pub use role::{RegistryKind, Role};
pub use shared::Shared;
pub use time::{Clock, SystemClock, Timestamp};
