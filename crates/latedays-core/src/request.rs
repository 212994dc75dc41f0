//! Student actions and requests

use latedays_util::{AssignmentId, Deadline};
use serde::{Deserialize, Serialize};

/// What the student wants to do.
///
/// An exhaustive tagged variant: every consumer dispatches by pattern
/// match, so a new action kind cannot be silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "act", rename_all = "snake_case")]
pub enum Action {
    /// Report current usage; never mutates the ledger.
    Summary,

    /// Return `days` previously used late days.
    Refund { days: u32 },

    /// Record `days` as the total used for this assignment. This replaces
    /// the current `used` value, it is not a delta.
    Request { days: u32 },
}

/// One student request against one assignment.
#[derive(Debug, Clone)]
pub struct Request {
    pub assignment_id: AssignmentId,
    pub action: Action,

    /// Submission time. The engine treats this as "now" for all window
    /// checks; it never samples the wall clock itself.
    pub timestamp: Deadline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_round_trips_through_tagged_json() {
        let action: Action = serde_json::from_str(r#"{"act":"refund","days":2}"#).unwrap();
        assert_eq!(action, Action::Refund { days: 2 });

        let action: Action = serde_json::from_str(r#"{"act":"summary"}"#).unwrap();
        assert_eq!(action, Action::Summary);

        let json = serde_json::to_string(&Action::Request { days: 1 }).unwrap();
        assert_eq!(json, r#"{"act":"request","days":1}"#);
    }

    #[test]
    fn unknown_action_tag_is_rejected() {
        let parsed: Result<Action, _> = serde_json::from_str(r#"{"act":"extend","days":1}"#);
        assert!(parsed.is_err());
    }
}
