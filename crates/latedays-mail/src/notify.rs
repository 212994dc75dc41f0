//! Notification seam and routing rules

use latedays_core::{Decision, Outcome};
use thiserror::Error;
use tracing::info;

/// Delivery failure from the notification collaborator.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to send notification: {0}")]
    SendFailed(String),
}

/// Routing for one outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOptions {
    pub cc: Option<String>,
    pub reply_to: String,
}

/// The delivery seam. Actual transport (the hosted mail service) lives
/// outside this workspace; implementations here are mocks and adapters.
pub trait Notifier: Send + Sync {
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &[String],
        options: &SendOptions,
    ) -> Result<(), NotifyError>;
}

/// Routing rules: replies normally go to the course mailbox. When a
/// decision is pending review, staff are looped in instead: the course
/// mailbox is cc'd and replies go back to the student.
pub fn routing(decision: &Decision, student_email: &str, course_email: &str) -> SendOptions {
    if decision.outcome == Some(Outcome::PendingReview) {
        SendOptions {
            cc: Some(course_email.to_string()),
            reply_to: student_email.to_string(),
        }
    } else {
        SendOptions {
            cc: None,
            reply_to: course_email.to_string(),
        }
    }
}

/// In-memory notifier that records every send (for testing).
#[derive(Default)]
pub struct MockNotifier {
    sent: std::sync::Mutex<Vec<SentMail>>,
}

/// One recorded send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: Vec<String>,
    pub options: SendOptions,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for MockNotifier {
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &[String],
        options: &SendOptions,
    ) -> Result<(), NotifyError> {
        info!(to = %to, subject = %subject, "Mock notification sent");
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_vec(),
            options: options.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latedays_core::{DeadlineState, Message};
    use latedays_util::{parse_instant, AssignmentId};
    use chrono_tz::America::Chicago;

    fn decision_with(outcome: Option<Outcome>) -> Decision {
        let deadline = parse_instant("2021-08-29T17:00:00-05:00", Chicago).unwrap();
        Decision {
            assignment_id: AssignmentId::new("Homework 1"),
            outcome,
            prior: DeadlineState { deadline, used: 1 },
            new: None,
            message: Message::RefundPendingReview { days_requested: 1 },
        }
    }

    #[test]
    fn pending_review_loops_in_staff() {
        let opts = routing(
            &decision_with(Some(Outcome::PendingReview)),
            "student@school.edu",
            "cool@school.edu",
        );
        assert_eq!(opts.cc.as_deref(), Some("cool@school.edu"));
        assert_eq!(opts.reply_to, "student@school.edu");
    }

    #[test]
    fn other_outcomes_route_replies_to_course() {
        for outcome in [Some(Outcome::Approved), Some(Outcome::Rejected), None] {
            let opts = routing(
                &decision_with(outcome),
                "student@school.edu",
                "cool@school.edu",
            );
            assert_eq!(opts.cc, None);
            assert_eq!(opts.reply_to, "cool@school.edu");
        }
    }

    #[test]
    fn mock_notifier_records_sends() {
        let notifier = MockNotifier::new();
        let opts = SendOptions {
            cc: None,
            reply_to: "cool@school.edu".into(),
        };
        notifier
            .send("student@school.edu", "Hi", &["line".into()], &opts)
            .unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "student@school.edu");
        assert_eq!(sent[0].options, opts);
    }
}
