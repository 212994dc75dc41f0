//! Configuration validation

use crate::schema::RawConfig;
use chrono_tz::Tz;
use latedays_util::parse_instant;
use std::collections::HashSet;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Assignment '{assignment}': invalid deadline '{value}': {message}")]
    InvalidDeadline {
        assignment: String,
        value: String,
        message: String,
    },

    #[error("No assignments configured")]
    NoAssignments,

    #[error("Duplicate form choice label: {0}")]
    DuplicateChoiceLabel(String),

    #[error("Form choice '{label}' references unknown assignment '{assignment}'")]
    UnknownAssignmentChoice { label: String, assignment: String },

    #[error("Invalid course email: {0}")]
    InvalidCourseEmail(String),

    #[error("Global config error: {0}")]
    GlobalError(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // The timezone must name a real IANA zone; deadline parsing and all
    // DST arithmetic depend on it.
    let tz: Option<Tz> = match config.timezone.parse() {
        Ok(tz) => Some(tz),
        Err(_) => {
            errors.push(ValidationError::InvalidTimezone(config.timezone.clone()));
            None
        }
    };

    if config.assignments.is_empty() {
        errors.push(ValidationError::NoAssignments);
    }

    if let Some(tz) = tz {
        for (assignment, raw) in &config.assignments {
            if let Err(e) = parse_instant(&raw.deadline, tz) {
                errors.push(ValidationError::InvalidDeadline {
                    assignment: assignment.clone(),
                    value: raw.deadline.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    if !config.email.course_email.contains('@') {
        errors.push(ValidationError::InvalidCourseEmail(
            config.email.course_email.clone(),
        ));
    }

    // Choice labels are the lookup keys for intake; duplicates would make
    // the second choice unreachable.
    let mut seen_labels = HashSet::new();
    for choice in &config.form.action_choices {
        if !seen_labels.insert(&choice.label) {
            errors.push(ValidationError::DuplicateChoiceLabel(choice.label.clone()));
        }
    }
    let mut seen_labels = HashSet::new();
    for choice in &config.form.assignment_choices {
        if !seen_labels.insert(&choice.label) {
            errors.push(ValidationError::DuplicateChoiceLabel(choice.label.clone()));
        }
        if !config.assignments.contains_key(&choice.assignment) {
            errors.push(ValidationError::UnknownAssignmentChoice {
                label: choice.label.clone(),
                assignment: choice.assignment.clone(),
            });
        }
    }

    errors
}
