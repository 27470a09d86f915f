//! Date and duration handling.
//!
//! The widget works in date-only strings (`YYYY-MM-DD`); the backend works
//! in absolute instants. To keep a date from drifting across a day boundary
//! when instants are truncated back to dates, outbound instants are anchored
//! at noon UTC. Durations are whole days and never less than one.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};

/// Parse whatever the backend put in a date field.
///
/// Accepts a bare `YYYY-MM-DD`, any string whose first ten characters form
/// one (covers every RFC 3339 spelling), or a full RFC 3339 instant.
/// Anything else is `None` and the caller falls back to a default.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Some(prefix) = trimmed.get(..10) {
        if let Ok(day) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(day);
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|instant| instant.date_naive())
}

/// Whole days between two dates, hour-blind, floored at one.
///
/// A missing or unparseable endpoint, an end before the start, and a
/// zero-length span all degrade to a one-day task.
pub fn duration_days(start: Option<NaiveDate>, end: Option<NaiveDate>) -> i64 {
    match (start, end) {
        (Some(start), Some(end)) => (end - start).num_days().max(1),
        _ => 1,
    }
}

/// The instant a task starts: noon UTC on its start date.
pub fn start_instant(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(12, 0, 0)
        .expect("noon is a valid time of day")
        .and_utc()
}

/// The instant a task ends: its start instant plus the duration in whole
/// days (floored at one).
pub fn end_instant(day: NaiveDate, duration_days: i64) -> DateTime<Utc> {
    start_instant(day) + Duration::days(duration_days.max(1))
}

/// Canonical wire form for outbound instants.
pub fn to_wire(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}
