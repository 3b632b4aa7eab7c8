//! Election coordinator.
//!
//! Constructed last, against the commission authority and both registries,
//! and linked into each registry exactly once. Owns the `[start, end)` voting
//! window: ballots are accepted only inside it, tallies only after it, and
//! the commissioner declares results once, which settles candidate deposits.

pub mod coordinator;
pub mod results;

pub use coordinator::{ElectionCoordinator, ElectionEvent};
pub use results::{ConstituencyResult, Declaration, ElectionResults, Phase, Standing};
