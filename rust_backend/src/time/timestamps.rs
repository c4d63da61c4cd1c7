//! Timestamp parsing for DONKI payloads and monthly bucket keys.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Timestamp layouts seen in DONKI payloads, tried after RFC 3339.
const DONKI_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M",
];

/// Parse a DONKI timestamp string into UTC.
///
/// DONKI mostly emits minute-precision times such as `"2024-05-10T16:36Z"`, which are
/// not valid RFC 3339, so a handful of layouts are accepted.
///
/// # Returns
/// * `Some(DateTime<Utc>)` - Parsed timestamp
/// * `None` - Empty or unrecognized input
///
/// # Example
/// ```
/// use aurora_rust::time::parse_donki_timestamp;
///
/// let ts = parse_donki_timestamp("2024-05-10T16:36Z").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2024-05-10T16:36:00+00:00");
/// ```
pub fn parse_donki_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DONKI_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a JSON timestamp: a DONKI string or epoch milliseconds.
pub fn parse_json_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => parse_donki_timestamp(raw),
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|ms| ms as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Monthly bucket key `"{year}-{month}"` with a 1-indexed, unpadded month.
pub fn month_key(ts: &DateTime<Utc>) -> String {
    format!("{}-{}", ts.year(), ts.month())
}
