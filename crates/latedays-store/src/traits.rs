//! Ledger trait definition

use latedays_core::LedgerEntry;
use latedays_util::StudentId;

use crate::StoreResult;

/// The durable per-student late-day ledger.
///
/// Callers must hold exclusive access to a student's record for the full
/// read → decide → write span (see `latedays-service`); the store itself
/// performs no request-level locking.
pub trait Ledger: Send + Sync {
    /// Read a student's record. A student with no stored record gets a
    /// zero-initialized entry covering every configured assignment.
    fn read_record(&self, student: &StudentId) -> StoreResult<LedgerEntry>;

    /// Persist a student's record, creating it if absent. Row order is
    /// irrelevant; only the (student, assignment) keys matter.
    fn update_record(&self, student: &StudentId, entry: &LedgerEntry) -> StoreResult<()>;

    /// Check if the store is reachable
    fn is_healthy(&self) -> bool;
}
