//! Decisions produced by the engine

use latedays_util::{AssignmentId, Deadline};
use serde::Serialize;

/// Three-valued outcome of a refund or request action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Approved,
    Rejected,
    /// The action is plausible but requires manual staff confirmation;
    /// the ledger is left untouched until `apply_reviewed_refund`.
    PendingReview,
}

/// Deadline and usage for one assignment at a point in the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeadlineState {
    pub deadline: Deadline,
    pub used: u32,
}

/// Message kind plus its parameters: the stable contract consumed by the
/// response-assembly layer. Parameter shapes here must not change without
/// updating every text provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    Summary,

    RefundBeyondPeriod {
        assignment_id: AssignmentId,
        cutoff: Deadline,
    },
    RefundNoUsedDays {
        assignment_id: AssignmentId,
        deadline: Deadline,
    },
    RefundPendingReview {
        days_requested: u32,
    },
    RefundApproved {
        assignment_id: AssignmentId,
        days_refunded: u32,
        deadline: Deadline,
        new_deadline: Deadline,
        free: u32,
    },

    RequestBeyondPeriod {
        assignment_id: AssignmentId,
        cutoff: Deadline,
    },
    RequestBelowUsed {
        used: u32,
    },
    RequestExceedsRemaining {
        assignment_id: AssignmentId,
        requested: u32,
        remaining: i64,
    },
    RequestApproved {
        assignment_id: AssignmentId,
        requested: u32,
        deadline: Deadline,
        new_deadline: Deadline,
        free: u32,
    },
}

/// The engine's answer to one request.
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    pub assignment_id: AssignmentId,

    /// `None` only for Summary, which neither approves nor rejects.
    pub outcome: Option<Outcome>,

    /// Deadline and usage before the decision.
    pub prior: DeadlineState,

    /// Present exactly when `outcome` is `Approved`.
    pub new: Option<DeadlineState>,

    pub message: Message,
}

impl Decision {
    pub fn is_approved(&self) -> bool {
        self.outcome == Some(Outcome::Approved)
    }

    pub fn is_pending_review(&self) -> bool {
        self.outcome == Some(Outcome::PendingReview)
    }
}
