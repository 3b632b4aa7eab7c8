//! The commission authority: the single commissioner and the roster of
//! constituency officers.
//!
//! Every commissioner- or officer-gated operation in the election core asks
//! [`CommissionAuthority::authorize`] whether its caller holds the role.
//! The commissioner is fixed at construction; the roster is append-only.

pub mod authority;
pub mod officer;

pub use authority::{AuthorityEvent, CommissionAuthority, Grant, Requirement};
pub use officer::Officer;
