//! Raw configuration schema (as parsed from TOML)

use latedays_core::Action;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// IANA timezone used to anchor deadlines and format message text,
    /// e.g. "America/Chicago"
    pub timezone: String,

    /// Assignments keyed by their ID
    #[serde(default)]
    pub assignments: BTreeMap<String, RawAssignment>,

    /// Late-day policy caps and windows
    pub policy: RawPolicy,

    /// Email routing settings
    pub email: RawEmail,

    /// Intake form settings
    #[serde(default)]
    pub form: RawForm,
}

/// Per-assignment settings. Currently only the deadline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawAssignment {
    /// Original deadline, RFC 3339 (e.g. "2021-08-29T17:00:00-05:00")
    pub deadline: String,
}

/// Raw policy caps
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPolicy {
    /// Maximum number of late days a student can use across the course
    pub max_late_days: u32,

    /// Maximum number of late days per assignment
    pub max_late_days_per_assignment: u32,

    /// Days after a deadline during which requests are accepted
    pub request_period_in_days: u32,

    /// Days after a deadline during which refunds are accepted
    pub refund_period_in_days: u32,
}

/// Email settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawEmail {
    /// Course mailbox used for reply-to and for cc on pending reviews
    pub course_email: String,

    /// Prefix prepended to every subject line, e.g. "[cs1234]"
    pub subject_prefix: Option<String>,
}

/// Intake form settings: the choice labels students see and what each
/// label maps to.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawForm {
    /// Form title (informational)
    pub title: Option<String>,

    /// Form description (informational)
    pub description: Option<String>,

    /// Choices for the action question
    #[serde(default)]
    pub action_choices: Vec<RawActionChoice>,

    /// Choices for the assignment question
    #[serde(default)]
    pub assignment_choices: Vec<RawAssignmentChoice>,
}

/// One action choice: the label shown on the form and the action it
/// stands for (flattened, so TOML reads `{ label = "...", act = "request",
/// days = 1 }`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawActionChoice {
    pub label: String,

    #[serde(flatten)]
    pub action: Action,
}

/// One assignment choice: the label shown on the form and the assignment
/// ID it stands for.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawAssignmentChoice {
    pub label: String,
    pub assignment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
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
            subject_prefix = "[awesome]"

            [[form.action_choices]]
            label = "Use 1 late day (in total) for this assignment"
            act = "request"
            days = 1

            [[form.action_choices]]
            label = "Check my late day usage"
            act = "summary"

            [[form.assignment_choices]]
            label = "Homework 1 (8/29)"
            assignment = "Homework 1"
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timezone, "America/Chicago");
        assert_eq!(config.assignments.len(), 1);
        assert_eq!(config.policy.max_late_days, 10);
        assert_eq!(config.form.action_choices.len(), 2);
        assert_eq!(
            config.form.action_choices[0].action,
            Action::Request { days: 1 }
        );
        assert_eq!(config.form.action_choices[1].action, Action::Summary);
    }

    #[test]
    fn parse_without_form_section() {
        let toml_str = r#"
            config_version = 1
            timezone = "America/Chicago"

            [policy]
            max_late_days = 10
            max_late_days_per_assignment = 2
            request_period_in_days = 2
            refund_period_in_days = 7

            [email]
            course_email = "cool@school.edu"
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert!(config.form.action_choices.is_empty());
        assert!(config.email.subject_prefix.is_none());
    }
}
