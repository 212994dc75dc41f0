//! Per-student late-day ledger shapes

use latedays_util::AssignmentId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Day counters for one assignment.
///
/// `used` reflects the student-facing action history and is only ever
/// mutated by approved engine branches. `free` is granted by mechanisms
/// outside this engine (staff reconciliation) and is only ever read here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCounters {
    pub used: u32,
    pub free: u32,
}

impl DayCounters {
    pub fn new(used: u32, free: u32) -> Self {
        Self { used, free }
    }

    /// Combined day count shown in usage summaries.
    pub fn total(&self) -> u32 {
        self.used + self.free
    }
}

/// One student's ledger: used/free counters per assignment.
///
/// Owned by the storage collaborator; the engine receives an entry by
/// mutable reference for the duration of one decision and mutates at most
/// one assignment's `used` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    days: BTreeMap<AssignmentId, DayCounters>,
}

impl LedgerEntry {
    /// Zero-initialized entry over the given assignment set, as produced
    /// by the store on first encounter with a student.
    pub fn zeroed<'a>(assignments: impl IntoIterator<Item = &'a AssignmentId>) -> Self {
        Self {
            days: assignments
                .into_iter()
                .map(|id| (id.clone(), DayCounters::default()))
                .collect(),
        }
    }

    /// Counters for an assignment; zero if the assignment has no row.
    pub fn counters(&self, assignment_id: &AssignmentId) -> DayCounters {
        self.days.get(assignment_id).copied().unwrap_or_default()
    }

    pub fn set_counters(&mut self, assignment_id: AssignmentId, counters: DayCounters) {
        self.days.insert(assignment_id, counters);
    }

    pub fn set_used(&mut self, assignment_id: &AssignmentId, used: u32) {
        self.days.entry(assignment_id.clone()).or_default().used = used;
    }

    /// Sum of `used` across all assignments, checked against the overall cap.
    pub fn total_used(&self) -> u32 {
        self.days.values().map(|d| d.used).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AssignmentId, &DayCounters)> {
        self.days.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_covers_all_assignments() {
        let hw1 = AssignmentId::new("Homework 1");
        let hw2 = AssignmentId::new("Homework 2");
        let entry = LedgerEntry::zeroed([&hw1, &hw2]);

        assert_eq!(entry.counters(&hw1), DayCounters::default());
        assert_eq!(entry.counters(&hw2), DayCounters::default());
        assert_eq!(entry.total_used(), 0);
    }

    #[test]
    fn missing_assignment_reads_as_zero() {
        let entry = LedgerEntry::default();
        assert_eq!(entry.counters(&AssignmentId::new("Homework 9")).total(), 0);
    }

    #[test]
    fn total_used_ignores_free_days() {
        let hw1 = AssignmentId::new("Homework 1");
        let hw2 = AssignmentId::new("Homework 2");
        let mut entry = LedgerEntry::default();
        entry.set_counters(hw1, DayCounters::new(2, 3));
        entry.set_counters(hw2, DayCounters::new(1, 0));

        assert_eq!(entry.total_used(), 3);
    }

    #[test]
    fn set_used_preserves_free_days() {
        let hw1 = AssignmentId::new("Homework 1");
        let mut entry = LedgerEntry::default();
        entry.set_counters(hw1.clone(), DayCounters::new(2, 1));
        entry.set_used(&hw1, 4);

        assert_eq!(entry.counters(&hw1), DayCounters::new(4, 1));
    }
}
