//! Deadline arithmetic for latedays
//!
//! Deadlines live in the course timezone (`chrono_tz::Tz`), so late-day
//! addition has to survive daylight-saving transitions. A local day can be
//! 23 or 25 hours long; `add_days` always grants the later of the two
//! interpretations so a student never receives less than a full day.

use chrono::{DateTime, Days, Duration, TimeZone};
use chrono_tz::Tz;

/// A timezone-qualified instant used for deadlines and request timestamps.
pub type Deadline = DateTime<Tz>;

/// Return the deadline after applying `days` late days.
///
/// Computes both interpretations, calendar days (same local time, `days`
/// dates later) and exact duration (`days` * 24 hours later), and returns
/// whichever lands later. The two differ only across a daylight-saving
/// transition.
///
/// If the calendar-day form hits a nonexistent local time (the skipped
/// hour of a spring-forward), the exact-duration form is used; it is never
/// the earlier one in that case.
pub fn add_days(instant: Deadline, days: u32) -> Deadline {
    let exact = instant + Duration::hours(i64::from(days) * 24);

    let calendar = instant
        .naive_local()
        .checked_add_days(Days::new(u64::from(days)))
        .and_then(|local| instant.timezone().from_local_datetime(&local).latest());

    match calendar {
        Some(calendar) => exact.max(calendar),
        None => exact,
    }
}

/// Format an instant for display in messages. Not used for comparisons.
pub fn format_deadline(instant: &Deadline) -> String {
    instant.format("%Y-%m-%d %H:%M %Z").to_string()
}

/// Parse an RFC 3339 timestamp and express it in the course timezone.
pub fn parse_instant(s: &str, tz: Tz) -> Result<Deadline, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Chicago;

    fn chicago(s: &str) -> Deadline {
        parse_instant(s, Chicago).unwrap()
    }

    #[test]
    fn add_days_across_spring_forward() {
        // 2021-03-14 has 23 local hours; the exact-duration form wins.
        let start = chicago("2021-03-13T17:00:00-06:00");
        assert_eq!(add_days(start, 1), chicago("2021-03-14T18:00:00-05:00"));
    }

    #[test]
    fn add_days_across_fall_back() {
        // 2021-11-07 has 25 local hours; the calendar-day form wins.
        let start = chicago("2021-11-06T17:00:00-05:00");
        assert_eq!(add_days(start, 1), chicago("2021-11-07T17:00:00-06:00"));
    }

    #[test]
    fn add_days_zero_is_identity() {
        let start = chicago("2021-08-29T17:00:00-05:00");
        assert_eq!(add_days(start, 0), start);
    }

    #[test]
    fn add_days_plain_week() {
        let start = chicago("2021-08-29T17:00:00-05:00");
        assert_eq!(add_days(start, 7), chicago("2021-09-05T17:00:00-05:00"));
    }

    #[test]
    fn add_days_monotonic_in_days() {
        let starts = [
            chicago("2021-03-13T17:00:00-06:00"),
            chicago("2021-11-06T17:00:00-05:00"),
            chicago("2021-08-29T17:00:00-05:00"),
        ];
        for start in starts {
            let mut prev = start;
            for n in 0..14 {
                let next = add_days(start, n);
                assert!(next >= prev, "add_days not monotonic at n = {}", n);
                prev = next;
            }
        }
    }

    #[test]
    fn format_includes_timezone() {
        let dt = chicago("2021-08-29T17:00:00-05:00");
        assert_eq!(format_deadline(&dt), "2021-08-29 17:00 CDT");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_instant("not a timestamp", Chicago).is_err());
        assert!(parse_instant("2021-08-29", Chicago).is_err());
    }
}
