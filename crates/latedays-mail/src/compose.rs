//! Email composition: rendered message plus usage-summary footer

use latedays_core::{Decision, LedgerEntry, PolicyCaps};

use crate::TextProvider;

/// A fully assembled outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub subject: String,
    pub body: Vec<String>,
}

/// Usage-summary footer: one line per assignment with any late days, then
/// the remaining overall allowance. Free days count toward the displayed
/// total but not against the allowance.
pub fn usage_summary(entry: &LedgerEntry, caps: &PolicyCaps) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for (assignment, days) in entry.iter() {
        if days.total() > 0 {
            let mut line = format!("{}: {}", assignment, days.total());
            if days.free > 0 {
                line.push_str(&format!(" (including {} free late day(s))", days.free));
            }
            lines.push(line);
        }
    }

    let remaining = i64::from(caps.max_late_days) - i64::from(entry.total_used());

    if lines.is_empty() {
        vec![
            "You have not spent any late day.".into(),
            format!("Remaining late day(s): {}", remaining),
        ]
    } else {
        let mut body = vec!["You have applied these late day(s):".into()];
        body.extend(lines);
        body.push(format!("Remaining late day(s): {}", remaining));
        body
    }
}

/// Assemble the outward email for a decision: render the message, prepend
/// the subject prefix, and append the usage-summary footer. The entry
/// passed here is the post-decision ledger state, so an approval's
/// summary already reflects the mutation.
pub fn compose(
    decision: &Decision,
    entry: &LedgerEntry,
    caps: &PolicyCaps,
    provider: &dyn TextProvider,
    subject_prefix: Option<&str>,
) -> Email {
    let rendered = provider.render(&decision.assignment_id, &decision.message);

    let subject = match subject_prefix {
        Some(prefix) => format!("{} {}", prefix, rendered.subject),
        None => rendered.subject,
    };

    let footer = usage_summary(entry, caps);
    let body = if rendered.body.is_empty() {
        footer
    } else {
        let mut body = rendered.body;
        body.push(String::new()); // blank line before the footer
        body.extend(footer);
        body
    };

    Email { subject, body }
}
