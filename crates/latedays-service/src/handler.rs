//! The submission handler: one request end to end

use latedays_config::CourseConfig;
use latedays_core::{apply_reviewed_refund, decide, Decision};
use latedays_intake::{parse_submission, FormSubmission};
use latedays_mail::{compose, routing, Notifier, TextProvider};
use latedays_store::Ledger;
use latedays_util::{AssignmentId, LateDaysError, Result, StudentId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::{LedgerLock, LockLease};

/// Orchestrates one submission: intake, lock, read, decide, write, notify.
///
/// Any error before the ledger write leaves the store untouched; an error
/// after the write (a failed send) is reported but the approved mutation
/// stands, matching the ledger-first ordering of the flow. The ledger is
/// only written on approved outcomes.
pub struct SubmissionHandler {
    config: CourseConfig,
    ledger: Arc<dyn Ledger>,
    lock: Arc<dyn LedgerLock>,
    text: Arc<dyn TextProvider>,
    notifier: Arc<dyn Notifier>,
    lock_timeout: Duration,
}

impl SubmissionHandler {
    pub fn new(
        config: CourseConfig,
        ledger: Arc<dyn Ledger>,
        lock: Arc<dyn LedgerLock>,
        text: Arc<dyn TextProvider>,
        notifier: Arc<dyn Notifier>,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            config,
            ledger,
            lock,
            text,
            notifier,
            lock_timeout,
        }
    }

    /// Handle one form submission end to end and return the decision.
    ///
    /// On `Err` the submission is unhandled: no ledger mutation has been
    /// persisted and no email has been sent (except on notify failures,
    /// where the decision was already applied).
    pub fn handle(&self, submission: &FormSubmission) -> Result<Decision> {
        let parsed = parse_submission(submission, &self.config)
            .map_err(|e| LateDaysError::intake(e.to_string()))?;

        info!(
            student_id = %parsed.student_id,
            assignment_id = %parsed.request.assignment_id,
            "Handling submission"
        );

        let _lease = self.acquire(&parsed.student_id)?;

        let mut entry = self
            .ledger
            .read_record(&parsed.student_id)
            .map_err(|e| LateDaysError::store(e.to_string()))?;

        let decision = decide(
            &mut entry,
            &parsed.request,
            &self.config.caps,
            &self.config.deadlines,
        )?;

        if decision.is_approved() {
            self.ledger
                .update_record(&parsed.student_id, &entry)
                .map_err(|e| LateDaysError::store(e.to_string()))?;
        }

        self.notify(&decision, &entry, &parsed.email)?;
        Ok(decision)
    }

    /// Apply a refund that staff confirmed after a pending-review decision,
    /// then notify the student of the result.
    pub fn handle_reviewed_refund(
        &self,
        student_id: &StudentId,
        student_email: &str,
        assignment_id: &AssignmentId,
        days: u32,
    ) -> Result<Decision> {
        info!(
            student_id = %student_id,
            assignment_id = %assignment_id,
            days,
            "Applying reviewed refund"
        );

        let _lease = self.acquire(student_id)?;

        let mut entry = self
            .ledger
            .read_record(student_id)
            .map_err(|e| LateDaysError::store(e.to_string()))?;

        let decision = apply_reviewed_refund(&mut entry, assignment_id, days, &self.config.deadlines)?;

        if decision.is_approved() {
            self.ledger
                .update_record(student_id, &entry)
                .map_err(|e| LateDaysError::store(e.to_string()))?;
        }

        self.notify(&decision, &entry, student_email)?;
        Ok(decision)
    }

    fn acquire(&self, student: &StudentId) -> Result<LockLease> {
        self.lock.acquire(student, self.lock_timeout).map_err(|_| {
            error!(student = %student, "Could not lock the ledger; leaving the request unhandled");
            LateDaysError::LockTimeout
        })
    }

    fn notify(
        &self,
        decision: &Decision,
        entry: &latedays_core::LedgerEntry,
        student_email: &str,
    ) -> Result<()> {
        let email = compose(
            decision,
            entry,
            &self.config.caps,
            self.text.as_ref(),
            self.config.email.subject_prefix.as_deref(),
        );
        let options = routing(decision, student_email, &self.config.email.course_email);

        self.notifier
            .send(student_email, &email.subject, &email.body, &options)
            .map_err(|e| LateDaysError::notify(e.to_string()))
    }
}
