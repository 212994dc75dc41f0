//! Message rendering

use latedays_core::Message;
use latedays_util::{format_deadline, AssignmentId};

/// A rendered message: the subject line and the body paragraphs, before
/// the usage-summary footer is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub subject: String,
    pub body: Vec<String>,
}

/// Renders a decision's message into display text.
///
/// The `Message` variants and their parameters are the stable contract
/// with the engine; a provider must handle every variant. Swapping the
/// provider swaps the wording without touching policy.
pub trait TextProvider: Send + Sync {
    fn render(&self, assignment_id: &AssignmentId, message: &Message) -> Rendered;
}

/// The stock English wording.
pub struct DefaultTextProvider;

impl TextProvider for DefaultTextProvider {
    fn render(&self, assignment_id: &AssignmentId, message: &Message) -> Rendered {
        match message {
            Message::Summary => Rendered {
                subject: "Late day summary".into(),
                body: vec![],
            },

            Message::RefundBeyondPeriod {
                assignment_id: a,
                cutoff,
            } => Rendered {
                subject: format!("Late day refund request for {} rejected", a),
                body: vec![
                    format!("It is too late to request the refund for {}.", a),
                    format!(
                        "The request should have been made by {}.",
                        format_deadline(cutoff)
                    ),
                    "Please check the rules in the syllabus.".into(),
                ],
            },

            Message::RefundNoUsedDays {
                assignment_id: a,
                deadline,
            } => Rendered {
                subject: format!("Late day refund request for {} rejected", a),
                body: vec![
                    format!("You didn't use any late days for {}.", a),
                    format!(
                        "The original deadline for {} is {}.",
                        a,
                        format_deadline(deadline)
                    ),
                ],
            },

            Message::RefundPendingReview { days_requested } => Rendered {
                subject: format!("Late day refund request for {} received", assignment_id),
                body: vec![
                    format!("You requested a refund of {} late day(s).", days_requested),
                    "It will take some time for us to review your refund request.".into(),
                    "Reply-all (not just reply) to this email if nothing happens in a week."
                        .into(),
                ],
            },

            Message::RefundApproved {
                assignment_id: a,
                days_refunded,
                deadline,
                new_deadline,
                free,
            } => Rendered {
                subject: format!(
                    "Late day refund for {} approved: new deadline {}",
                    a,
                    format_deadline(new_deadline)
                ),
                body: {
                    let mut body = vec![format!(
                        "This is a confirmation that you got {} late day(s) refunded for {}.",
                        days_refunded, a
                    )];
                    if *free > 0 {
                        body.push(format!(
                            "You have also received {} free late day(s) for {}.",
                            free, a
                        ));
                    }
                    body.push(format!(
                        "The original deadline for {} is {}.",
                        a,
                        format_deadline(deadline)
                    ));
                    body.push(format!("The new deadline is {}.", format_deadline(new_deadline)));
                    body
                },
            },

            Message::RequestBeyondPeriod {
                assignment_id: a,
                cutoff,
            } => Rendered {
                subject: format!("Late day request for {} rejected", a),
                body: vec![
                    format!("It is too late to request late days for {}.", a),
                    format!(
                        "The request should have been made by {}.",
                        format_deadline(cutoff)
                    ),
                    "Please check the rules in the syllabus.".into(),
                ],
            },

            Message::RequestBelowUsed { used } => Rendered {
                subject: format!("Late day request for {} rejected", assignment_id),
                body: vec![
                    format!(
                        "You've already spent {} late day(s), so you cannot request fewer late day(s).",
                        used
                    ),
                    "For refund, please choose the refund options.".into(),
                ],
            },

            Message::RequestExceedsRemaining {
                assignment_id: a,
                requested,
                remaining,
            } => Rendered {
                subject: format!("Late day request for {} rejected", a),
                body: vec![format!(
                    "You cannot request {} late day(s) for {}, because you only have {} late day(s) available.",
                    requested, a, remaining
                )],
            },

            Message::RequestApproved {
                assignment_id: a,
                requested,
                deadline,
                new_deadline,
                free,
            } => Rendered {
                subject: format!(
                    "Late day request for {} approved: new deadline {}",
                    a,
                    format_deadline(new_deadline)
                ),
                body: {
                    let mut body = vec![format!(
                        "This is a confirmation that you spent {} day(s) for {}.",
                        requested, a
                    )];
                    if *free > 0 {
                        body.push(format!(
                            "You have also received {} free late day(s) for {}.",
                            free, a
                        ));
                    }
                    body.push(format!(
                        "The original deadline for {} is {}.",
                        a,
                        format_deadline(deadline)
                    ));
                    body.push(format!(
                        "The new deadline for {} is {}.",
                        a,
                        format_deadline(new_deadline)
                    ));
                    body
                },
            },
        }
    }
}
