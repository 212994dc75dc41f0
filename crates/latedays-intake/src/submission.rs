//! Submission parsing

use latedays_config::CourseConfig;
use latedays_core::Request;
use latedays_util::{parse_instant, StudentId};
use serde::Deserialize;
use tracing::debug;

use crate::{IntakeError, IntakeResult};

/// A raw form submission as delivered by the intake collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct FormSubmission {
    /// Submitter's institutional email address
    pub email: String,

    /// Submission time, RFC 3339
    pub timestamp: String,

    /// The label the student picked for the assignment question
    pub assignment_answer: String,

    /// The label the student picked for the action question
    pub action_answer: String,
}

/// A submission after intake validation.
#[derive(Debug, Clone)]
pub struct ParsedSubmission {
    pub student_id: StudentId,
    pub email: String,
    pub request: Request,
}

/// Derive the student ID from an institutional email address: the
/// characters before the first `@`. The same person may submit under
/// domain variants over time, so the domain is deliberately dropped.
pub fn student_id_of_email(email: &str) -> IntakeResult<StudentId> {
    match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => Ok(StudentId::new(local)),
        _ => Err(IntakeError::MalformedEmail(email.to_string())),
    }
}

/// Validate a form submission against the course configuration.
pub fn parse_submission(
    submission: &FormSubmission,
    config: &CourseConfig,
) -> IntakeResult<ParsedSubmission> {
    let student_id = student_id_of_email(&submission.email)?;

    let assignment_id = config
        .form
        .assignment_for(&submission.assignment_answer)
        .ok_or_else(|| IntakeError::UnknownChoice {
            question: "assignment",
            answer: submission.assignment_answer.clone(),
        })?
        .clone();

    let action = config
        .form
        .action_for(&submission.action_answer)
        .ok_or_else(|| IntakeError::UnknownChoice {
            question: "action",
            answer: submission.action_answer.clone(),
        })?;

    let timestamp = parse_instant(&submission.timestamp, config.timezone).map_err(|e| {
        IntakeError::InvalidTimestamp {
            value: submission.timestamp.clone(),
            message: e.to_string(),
        }
    })?;

    debug!(
        student_id = %student_id,
        assignment_id = %assignment_id,
        action = ?action,
        "Submission parsed"
    );

    Ok(ParsedSubmission {
        student_id,
        email: submission.email.clone(),
        request: Request {
            assignment_id,
            action,
            timestamp,
        },
    })
}

/// Parse a JSON submission payload and validate it in one step.
pub fn parse_submission_json(
    payload: &str,
    config: &CourseConfig,
) -> IntakeResult<ParsedSubmission> {
    let submission: FormSubmission = serde_json::from_str(payload)
        .map_err(|e| IntakeError::MalformedPayload(e.to_string()))?;
    parse_submission(&submission, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use latedays_core::Action;
    use latedays_util::AssignmentId;

    fn test_config() -> CourseConfig {
        latedays_config::parse_config(
            r#"
            config_version = 1
            timezone = "America/Chicago"

            [assignments."Homework 1"]
            deadline = "2021-08-29T17:00:00-05:00"

            [policy]
            max_late_days = 10
            max_late_days_per_assignment = 2
            request_period_in_days = 2
            refund_period_in_days = 7

            [email]
            course_email = "cool@school.edu"

            [[form.action_choices]]
            label = "Use 1 late day (in total) for this assignment"
            act = "request"
            days = 1

            [[form.action_choices]]
            label = "Refund 1 late day from this assignment"
            act = "refund"
            days = 1

            [[form.assignment_choices]]
            label = "Homework 1 (8/29)"
            assignment = "Homework 1"
            "#,
        )
        .unwrap()
    }

    fn submission() -> FormSubmission {
        FormSubmission {
            email: "favonia@school.edu".into(),
            timestamp: "2021-08-29T12:00:00-05:00".into(),
            assignment_answer: "Homework 1 (8/29)".into(),
            action_answer: "Use 1 late day (in total) for this assignment".into(),
        }
    }

    #[test]
    fn student_id_is_the_email_local_part() {
        assert_eq!(
            student_id_of_email("favonia@school.edu").unwrap(),
            StudentId::new("favonia")
        );
        // Domain variants map to the same student.
        assert_eq!(
            student_id_of_email("favonia@cs.school.edu").unwrap(),
            StudentId::new("favonia")
        );
    }

    #[test]
    fn email_without_local_part_is_rejected() {
        assert!(matches!(
            student_id_of_email("school.edu"),
            Err(IntakeError::MalformedEmail(_))
        ));
        assert!(matches!(
            student_id_of_email("@school.edu"),
            Err(IntakeError::MalformedEmail(_))
        ));
    }

    #[test]
    fn valid_submission_parses() {
        let parsed = parse_submission(&submission(), &test_config()).unwrap();
        assert_eq!(parsed.student_id, StudentId::new("favonia"));
        assert_eq!(parsed.request.assignment_id, AssignmentId::new("Homework 1"));
        assert_eq!(parsed.request.action, Action::Request { days: 1 });
    }

    #[test]
    fn unknown_choice_labels_are_rejected() {
        let config = test_config();

        let mut bad_action = submission();
        bad_action.action_answer = "Use 99 late days".into();
        assert!(matches!(
            parse_submission(&bad_action, &config),
            Err(IntakeError::UnknownChoice {
                question: "action",
                ..
            })
        ));

        let mut bad_assignment = submission();
        bad_assignment.assignment_answer = "Homework 9".into();
        assert!(matches!(
            parse_submission(&bad_assignment, &config),
            Err(IntakeError::UnknownChoice {
                question: "assignment",
                ..
            })
        ));
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let mut bad = submission();
        bad.timestamp = "yesterday-ish".into();
        assert!(matches!(
            parse_submission(&bad, &test_config()),
            Err(IntakeError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn json_payload_parses() {
        let payload = r#"{
            "email": "favonia@school.edu",
            "timestamp": "2021-08-29T12:00:00-05:00",
            "assignment_answer": "Homework 1 (8/29)",
            "action_answer": "Refund 1 late day from this assignment"
        }"#;

        let parsed = parse_submission_json(payload, &test_config()).unwrap();
        assert_eq!(parsed.request.action, Action::Refund { days: 1 });
    }

    #[test]
    fn garbage_payload_is_rejected() {
        assert!(matches!(
            parse_submission_json("not json", &test_config()),
            Err(IntakeError::MalformedPayload(_))
        ));
    }
}
