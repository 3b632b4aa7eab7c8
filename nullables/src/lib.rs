//! Nullable infrastructure for deterministic testing.
//!
//! The election core takes the substrate's current time as an explicit
//! argument; orchestrators read it from a [`Clock`](franchise_types::Clock).
//! Tests swap the system clock for [`NullClock`], which only moves when told.

pub mod clock;

pub use clock::NullClock;
