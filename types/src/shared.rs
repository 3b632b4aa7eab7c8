//! Shared component handles.
//!
//! Components reference each other through `Arc<RwLock<_>>`. A poisoned lock
//! only means another caller panicked mid-operation; every operation
//! validates before mutating, so the guarded state is still consistent and
//! the guard is recovered rather than propagated as a panic.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A component shared between the orchestrator and its dependents.
pub type Shared<T> = Arc<RwLock<T>>;

pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}

pub fn read<T>(handle: &Shared<T>) -> RwLockReadGuard<'_, T> {
    handle.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write<T>(handle: &Shared<T>) -> RwLockWriteGuard<'_, T> {
    handle.write().unwrap_or_else(PoisonError::into_inner)
}
