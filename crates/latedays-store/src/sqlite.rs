//! SQLite-based ledger implementation

use latedays_core::{DayCounters, LedgerEntry};
use latedays_util::{AssignmentId, StudentId};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::{Ledger, StoreError, StoreResult};

/// SQLite-based ledger store.
///
/// One row per (student, assignment) pair holding the used and free
/// counters; a missing row reads as zero. The store is constructed with
/// the configured assignment set so that first-time reads come back
/// zero-initialized over every assignment.
pub struct SqliteLedger {
    conn: Mutex<Connection>,
    assignments: Vec<AssignmentId>,
}

impl SqliteLedger {
    /// Open or create a ledger at the given path
    pub fn open(path: impl AsRef<Path>, assignments: Vec<AssignmentId>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
            assignments,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory ledger (for testing)
    pub fn in_memory(assignments: Vec<AssignmentId>) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
            assignments,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(
            r#"
            -- Per-student, per-assignment day counters
            CREATE TABLE IF NOT EXISTS ledger (
                student_id TEXT NOT NULL,
                assignment_id TEXT NOT NULL,
                used INTEGER NOT NULL DEFAULT 0 CHECK (used >= 0),
                free INTEGER NOT NULL DEFAULT 0 CHECK (free >= 0),
                PRIMARY KEY (student_id, assignment_id)
            );

            CREATE INDEX IF NOT EXISTS idx_ledger_student ON ledger(student_id);
            "#,
        )?;

        debug!("Ledger schema initialized");
        Ok(())
    }
}

impl Ledger for SqliteLedger {
    fn read_record(&self, student: &StudentId) -> StoreResult<LedgerEntry> {
        let conn = self.conn.lock().unwrap();

        let mut entry = LedgerEntry::zeroed(&self.assignments);

        let mut stmt = conn.prepare(
            "SELECT assignment_id, used, free FROM ledger WHERE student_id = ?",
        )?;
        let rows = stmt.query_map([student.as_str()], |row| {
            let assignment: String = row.get(0)?;
            let used: i64 = row.get(1)?;
            let free: i64 = row.get(2)?;
            Ok((assignment, used, free))
        })?;

        for row in rows {
            let (assignment, used, free) = row?;
            let used = u32::try_from(used).map_err(|_| {
                StoreError::CorruptRow(format!(
                    "negative used count for {} / {}",
                    student, assignment
                ))
            })?;
            let free = u32::try_from(free).map_err(|_| {
                StoreError::CorruptRow(format!(
                    "negative free count for {} / {}",
                    student, assignment
                ))
            })?;
            entry.set_counters(AssignmentId::new(assignment), DayCounters::new(used, free));
        }

        Ok(entry)
    }

    fn update_record(&self, student: &StudentId, entry: &LedgerEntry) -> StoreResult<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        for (assignment, counters) in entry.iter() {
            tx.execute(
                r#"
                INSERT INTO ledger (student_id, assignment_id, used, free)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(student_id, assignment_id)
                DO UPDATE SET used = excluded.used, free = excluded.free
                "#,
                params![
                    student.as_str(),
                    assignment.as_str(),
                    counters.used,
                    counters.free
                ],
            )?;
        }

        tx.commit()?;
        debug!(student = %student, "Ledger record updated");
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Ledger lock poisoned");
                false
            }
        }
    }
}
