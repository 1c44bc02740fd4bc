//! Timestamps and id assignment.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use uuid::Uuid;

/// Assigns a fresh record id.
///
/// UUIDv4; collisions are treated as negligible and not re-checked.
pub fn assign_id() -> String {
    Uuid::new_v4().to_string()
}

/// Renders a timestamp in the stored form, e.g.
/// `2024-05-01T12:00:00.000000+00:00`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parses an RFC 3339 timestamp and normalizes it to UTC.
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    DateTime::<FixedOffset>::parse_from_rfc3339(raw)
        .ok()
        .map(|t| format_timestamp(t.with_timezone(&Utc)))
}

/// Current time in the stored form
pub fn now() -> String {
    format_timestamp(Utc::now())
}
