//! Validated course configuration

use crate::schema::RawConfig;
use chrono_tz::Tz;
use latedays_core::{Action, Deadlines, PolicyCaps};
use latedays_util::{parse_instant, AssignmentId};

/// Validated course configuration ready for use by the engine and its
/// collaborators. Constructed from a `RawConfig` that already passed
/// `validate_config`, so the conversions here cannot fail.
#[derive(Debug, Clone)]
pub struct CourseConfig {
    /// Course timezone; all deadlines and timestamps are expressed in it.
    pub timezone: Tz,

    /// Policy caps and windows
    pub caps: PolicyCaps,

    /// Original deadlines keyed by assignment
    pub deadlines: Deadlines,

    /// Email routing settings
    pub email: EmailSettings,

    /// Intake form choice mappings
    pub form: FormSettings,
}

impl CourseConfig {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let timezone: Tz = raw
            .timezone
            .parse()
            .expect("timezone was checked by validation");

        let deadlines: Deadlines = raw
            .assignments
            .iter()
            .map(|(id, a)| {
                let deadline = parse_instant(&a.deadline, timezone)
                    .expect("deadline was checked by validation");
                (AssignmentId::new(id.clone()), deadline)
            })
            .collect();

        let caps = PolicyCaps {
            max_late_days: raw.policy.max_late_days,
            max_late_days_per_assignment: raw.policy.max_late_days_per_assignment,
            request_period_in_days: raw.policy.request_period_in_days,
            refund_period_in_days: raw.policy.refund_period_in_days,
        };

        let form = FormSettings {
            action_choices: raw
                .form
                .action_choices
                .into_iter()
                .map(|c| (c.label, c.action))
                .collect(),
            assignment_choices: raw
                .form
                .assignment_choices
                .into_iter()
                .map(|c| (c.label, AssignmentId::new(c.assignment)))
                .collect(),
        };

        Self {
            timezone,
            caps,
            deadlines,
            email: EmailSettings {
                course_email: raw.email.course_email,
                subject_prefix: raw.email.subject_prefix,
            },
            form,
        }
    }

    /// IDs of all configured assignments, in deadline-table order
    pub fn assignment_ids(&self) -> impl Iterator<Item = &AssignmentId> {
        self.deadlines.keys()
    }
}

/// Email routing settings
#[derive(Debug, Clone)]
pub struct EmailSettings {
    /// Course mailbox: default reply-to, and cc target on pending reviews
    pub course_email: String,

    /// Prefix prepended to every outgoing subject
    pub subject_prefix: Option<String>,
}

/// Intake form choice mappings: form label to meaning
#[derive(Debug, Clone)]
pub struct FormSettings {
    pub action_choices: Vec<(String, Action)>,
    pub assignment_choices: Vec<(String, AssignmentId)>,
}

impl FormSettings {
    /// Resolve an action answer to its configured action
    pub fn action_for(&self, label: &str) -> Option<Action> {
        self.action_choices
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, a)| *a)
    }

    /// Resolve an assignment answer to its configured assignment ID
    pub fn assignment_for(&self, label: &str) -> Option<&AssignmentId> {
        self.assignment_choices
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, a)| a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawConfig {
        toml::from_str(
            r#"
            config_version = 1
            timezone = "America/Chicago"

            [assignments."Homework 1"]
            deadline = "2021-08-29T17:00:00-05:00"

            [assignments."Homework 2"]
            deadline = "2021-08-30T17:00:00-05:00"

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

            [[form.assignment_choices]]
            label = "Homework 1 (8/29)"
            assignment = "Homework 1"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn from_raw_builds_deadline_table() {
        let config = CourseConfig::from_raw(sample_raw());
        assert_eq!(config.deadlines.len(), 2);

        let hw1 = config
            .deadlines
            .get(&AssignmentId::new("Homework 1"))
            .unwrap();
        assert_eq!(
            *hw1,
            parse_instant("2021-08-29T17:00:00-05:00", config.timezone).unwrap()
        );
    }

    #[test]
    fn form_lookups_resolve_labels() {
        let config = CourseConfig::from_raw(sample_raw());
        assert_eq!(
            config
                .form
                .action_for("Use 1 late day (in total) for this assignment"),
            Some(Action::Request { days: 1 })
        );
        assert_eq!(
            config.form.assignment_for("Homework 1 (8/29)"),
            Some(&AssignmentId::new("Homework 1"))
        );
        assert_eq!(config.form.action_for("no such label"), None);
    }
}
