//! Ledger mutual exclusion

use latedays_util::StudentId;
use std::collections::HashSet;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::warn;

/// Lock acquisition failure. A timed-out request must be treated as
/// unhandled: neither answered nor partially applied.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("Timed out waiting for the ledger lock")]
    Timeout,
}

/// A held lease on one student's ledger row. Released on drop.
pub struct LockLease {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl LockLease {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for LockLease {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// The mutual-exclusion seam over ledger rows. Deployments backed by a
/// hosted platform inject the platform's lock service; in-process
/// deployments use `InProcessLock`.
pub trait LedgerLock: Send + Sync {
    /// Acquire exclusive access to one student's ledger row, waiting at
    /// most `timeout`.
    fn acquire(&self, student: &StudentId, timeout: Duration) -> Result<LockLease, LockError>;
}

/// Per-student locks for a single-process deployment.
#[derive(Default)]
pub struct InProcessLock {
    state: Arc<LockState>,
}

#[derive(Default)]
struct LockState {
    held: Mutex<HashSet<StudentId>>,
    released: Condvar,
}

impl InProcessLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerLock for InProcessLock {
    fn acquire(&self, student: &StudentId, timeout: Duration) -> Result<LockLease, LockError> {
        let deadline = Instant::now() + timeout;
        let mut held = self.state.held.lock().unwrap();

        while held.contains(student) {
            let remaining = match deadline.checked_duration_since(Instant::now()) {
                Some(remaining) if !remaining.is_zero() => remaining,
                _ => {
                    warn!(student = %student, "Ledger lock acquisition timed out");
                    return Err(LockError::Timeout);
                }
            };

            let (guard, result) = self
                .state
                .released
                .wait_timeout(held, remaining)
                .unwrap();
            held = guard;

            if result.timed_out() && held.contains(student) {
                warn!(student = %student, "Ledger lock acquisition timed out");
                return Err(LockError::Timeout);
            }
        }

        held.insert(student.clone());
        drop(held);

        let state = Arc::clone(&self.state);
        let student = student.clone();
        Ok(LockLease::new(move || {
            state.held.lock().unwrap().remove(&student);
            state.released.notify_all();
        }))
    }
}
