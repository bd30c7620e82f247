//! The committed leave policy and the single-writer lock around it.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, RwLock};

use crate::config::VersionedPolicy;

/// Holds the committed policy version.
///
/// Readers clone the current `Arc` and keep using it for the rest of their
/// operation. Writers (settings updates, recalculations, approvals) hold the
/// writer lock for their whole pass and publish a new version with
/// [`PolicyState::publish`] only after the store has committed it.
#[derive(Debug)]
pub struct PolicyState {
    current: RwLock<Arc<VersionedPolicy>>,
    writer: Mutex<()>,
}

impl PolicyState {
    /// Creates the state holding `policy`.
    pub fn new(policy: VersionedPolicy) -> Self {
        Self {
            current: RwLock::new(Arc::new(policy)),
            writer: Mutex::new(()),
        }
    }

    /// Returns the committed policy version.
    pub fn current(&self) -> Arc<VersionedPolicy> {
        Arc::clone(&self.current.read())
    }

    /// Acquires the single-writer lock.
    pub fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock()
    }

    /// Replaces the committed policy. Callers must hold the writer lock.
    pub fn publish(&self, policy: VersionedPolicy) {
        *self.current.write() = Arc::new(policy);
    }
}
