use chrono::{SecondsFormat, Utc};

/// Current UTC time as an ISO 8601 string with millisecond precision,
/// e.g. `2026-10-16T10:00:00.000Z`.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
