//! The late-day decision function

use latedays_util::{add_days, AssignmentId, Deadline, LateDaysError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::{Action, DayCounters, Decision, DeadlineState, LedgerEntry, Message, Outcome, Request};

/// Process-wide policy caps, immutable per decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyCaps {
    /// Total late days a student may use across the course.
    pub max_late_days: u32,

    /// Per-assignment cap. Present in configuration but not consulted by
    /// any decision branch; see DESIGN.md before wiring it in.
    pub max_late_days_per_assignment: u32,

    /// Days after an assignment's deadline during which late-day requests
    /// are auto-processed.
    pub request_period_in_days: u32,

    /// Days after an assignment's deadline during which refunds are
    /// auto-processed.
    pub refund_period_in_days: u32,
}

/// Original-deadline table, keyed by assignment.
pub type Deadlines = BTreeMap<AssignmentId, Deadline>;

/// Decide one request against one student's ledger entry.
///
/// Mutates `entry` in place if and only if the outcome is `Approved`;
/// every other branch is a pure read. "Now" is `request.timestamp`.
///
/// Fails fast on malformed input (an assignment absent from `deadlines`,
/// a zero-day refund) instead of defaulting: a silent default would
/// corrupt the ledger or mis-inform the student.
pub fn decide(
    entry: &mut LedgerEntry,
    request: &Request,
    caps: &PolicyCaps,
    deadlines: &Deadlines,
) -> Result<Decision> {
    let assignment_id = &request.assignment_id;
    let deadline = lookup_deadline(deadlines, assignment_id)?;
    let now = request.timestamp;

    let remaining = i64::from(caps.max_late_days) - i64::from(entry.total_used());
    let DayCounters { used, free } = entry.counters(assignment_id);
    let prior = DeadlineState { deadline, used };

    let decision = match request.action {
        Action::Summary => Decision {
            assignment_id: assignment_id.clone(),
            outcome: None,
            prior,
            new: None,
            message: Message::Summary,
        },

        Action::Refund { days } => {
            if days == 0 {
                return Err(LateDaysError::ZeroRefund);
            }

            // Deadline implied if exactly `days` are refunded, before free days.
            let checkpoint = add_days(deadline, used.saturating_sub(days));
            let cutoff = add_days(deadline, caps.refund_period_in_days);

            if now > cutoff {
                rejected(prior, assignment_id, Message::RefundBeyondPeriod {
                    assignment_id: assignment_id.clone(),
                    cutoff,
                })
            } else if used == 0 {
                rejected(prior, assignment_id, Message::RefundNoUsedDays {
                    assignment_id: assignment_id.clone(),
                    deadline,
                })
            } else if now > checkpoint {
                // An automatic refund would no longer land before the
                // student's own submission time; staff must confirm.
                Decision {
                    assignment_id: assignment_id.clone(),
                    outcome: Some(Outcome::PendingReview),
                    prior,
                    new: None,
                    message: Message::RefundPendingReview {
                        days_requested: days,
                    },
                }
            } else {
                apply_refund(entry, assignment_id, prior, used, free, days)
            }
        }

        Action::Request { days } => {
            let cutoff = add_days(deadline, caps.request_period_in_days);

            if now > cutoff {
                rejected(prior, assignment_id, Message::RequestBeyondPeriod {
                    assignment_id: assignment_id.clone(),
                    cutoff,
                })
            } else if days < used {
                // The student wants to reduce usage; point them at the
                // refund flow rather than the quota.
                rejected(prior, assignment_id, Message::RequestBelowUsed { used })
            } else if i64::from(days) - i64::from(used) > remaining {
                rejected(prior, assignment_id, Message::RequestExceedsRemaining {
                    assignment_id: assignment_id.clone(),
                    requested: days,
                    remaining,
                })
            } else {
                entry.set_used(assignment_id, days);
                let new_deadline = add_days(deadline, days + free);

                info!(
                    assignment_id = %assignment_id,
                    requested = days,
                    new_deadline = %new_deadline,
                    "Late day request approved"
                );

                Decision {
                    assignment_id: assignment_id.clone(),
                    outcome: Some(Outcome::Approved),
                    prior,
                    new: Some(DeadlineState {
                        deadline: new_deadline,
                        used: days,
                    }),
                    message: Message::RequestApproved {
                        assignment_id: assignment_id.clone(),
                        requested: days,
                        deadline,
                        new_deadline,
                        free,
                    },
                }
            }
        }
    };

    Ok(decision)
}

/// Apply a refund that staff confirmed after a pending-review decision.
///
/// The window and checkpoint checks are replaced by staff judgment, so
/// only the malformed-input conditions remain: the assignment must exist
/// and `days` must be positive. Refunding an assignment with no used days
/// still comes back rejected rather than minting negative usage.
pub fn apply_reviewed_refund(
    entry: &mut LedgerEntry,
    assignment_id: &AssignmentId,
    days: u32,
    deadlines: &Deadlines,
) -> Result<Decision> {
    if days == 0 {
        return Err(LateDaysError::ZeroRefund);
    }

    let deadline = lookup_deadline(deadlines, assignment_id)?;
    let DayCounters { used, free } = entry.counters(assignment_id);
    let prior = DeadlineState { deadline, used };

    if used == 0 {
        return Ok(rejected(prior, assignment_id, Message::RefundNoUsedDays {
            assignment_id: assignment_id.clone(),
            deadline,
        }));
    }

    Ok(apply_refund(entry, assignment_id, prior, used, free, days))
}

fn lookup_deadline(deadlines: &Deadlines, assignment_id: &AssignmentId) -> Result<Deadline> {
    deadlines
        .get(assignment_id)
        .copied()
        .ok_or_else(|| LateDaysError::UnknownAssignment(assignment_id.clone()))
}

fn apply_refund(
    entry: &mut LedgerEntry,
    assignment_id: &AssignmentId,
    prior: DeadlineState,
    used: u32,
    free: u32,
    days: u32,
) -> Decision {
    let new_used = used.saturating_sub(days);
    entry.set_used(assignment_id, new_used);
    let new_deadline = add_days(prior.deadline, new_used + free);

    info!(
        assignment_id = %assignment_id,
        days_refunded = used.min(days),
        new_deadline = %new_deadline,
        "Late day refund approved"
    );

    Decision {
        assignment_id: assignment_id.clone(),
        outcome: Some(Outcome::Approved),
        prior,
        new: Some(DeadlineState {
            deadline: new_deadline,
            used: new_used,
        }),
        message: Message::RefundApproved {
            assignment_id: assignment_id.clone(),
            days_refunded: used.min(days),
            deadline: prior.deadline,
            new_deadline,
            free,
        },
    }
}

fn rejected(prior: DeadlineState, assignment_id: &AssignmentId, message: Message) -> Decision {
    debug!(assignment_id = %assignment_id, message = ?message, "Action rejected");

    Decision {
        assignment_id: assignment_id.clone(),
        outcome: Some(Outcome::Rejected),
        prior,
        new: None,
        message,
    }
}
