//! Time utilities for export documents

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a timestamp as ISO 8601 with millisecond precision and a `Z` suffix
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use mobility_feed_decoder::utils::time::iso_timestamp;
/// let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(iso_timestamp(&ts), "2024-01-02T03:04:05.000Z");
/// ```
pub fn iso_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Compact UTC stamp for export file names (e.g. `20240102T030405Z`)
pub fn file_stamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y%m%dT%H%M%SZ").to_string()
}
