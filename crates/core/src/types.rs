use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Drawings and strokes are keyed by random (v4) UUIDs.
pub type DrawingId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = DateTime<Utc>;

/// Current time truncated to millisecond precision, so a value survives
/// the round trip through its ISO-8601 text form unchanged.
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(3)
}

/// Format a timestamp as ISO-8601 with milliseconds and a `Z` suffix,
/// e.g. `2024-05-01T12:30:00.250Z`.
pub fn to_iso(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_iso(s: &str) -> Result<Timestamp, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// Milliseconds since the Unix epoch.
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_round_trip_preserves_millisecond_timestamps() {
        let ts = now();
        let text = to_iso(&ts);
        assert!(text.ends_with('Z'), "expected Z suffix, got {text}");
        assert_eq!(parse_iso(&text).unwrap(), ts);
    }

    #[test]
    fn parse_iso_rejects_garbage() {
        assert!(parse_iso("yesterday").is_err());
    }
}
