//! Time helpers. All timestamps are Unix milliseconds, rendered in JST.

use chrono::{DateTime, FixedOffset, Offset, Utc};

const JST_OFFSET_SECS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    FixedOffset::east_opt(JST_OFFSET_SECS).unwrap_or(Utc.fix())
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    Utc::now().with_timezone(&jst()).timestamp_millis()
}

/// Render a Unix millisecond timestamp as an RFC 3339 string in JST.
///
/// Out-of-range values fall back to the raw number.
pub fn timestamp_to_jst_rfc3339(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&jst()).to_rfc3339())
        .unwrap_or_else(|| millis.to_string())
}

/// Format a Unix millisecond timestamp as `HH:MM:SS` in JST.
pub fn format_jst_clock(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.with_timezone(&jst()).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
