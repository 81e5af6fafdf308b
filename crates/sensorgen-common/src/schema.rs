//! Batch file schema and versioning.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Current schema version for JSON summaries.
///
/// Follows semver: MAJOR.MINOR.PATCH
/// - MAJOR: Breaking changes (field removals, type changes)
/// - MINOR: Additive changes (new optional fields)
/// - PATCH: Bug fixes, documentation
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Column order of every batch file. Downstream ingestion maps by position.
pub const CSV_COLUMNS: [&str; 6] = [
    "machine_id",
    "timestamp",
    "temperature",
    "vibration",
    "pressure",
    "status_code",
];

/// Header line of every batch file.
pub const CSV_HEADER: &str = "machine_id,timestamp,temperature,vibration,pressure,status_code";

/// Position of the `timestamp` column when the header cannot be consulted.
pub const TIMESTAMP_COLUMN: usize = 1;

/// UTC, second precision, literal `Z` suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Batch file name prefix.
pub const BATCH_FILE_PREFIX: &str = "sensor_data_batch_";

/// Batch file extension (without the dot).
pub const BATCH_FILE_EXTENSION: &str = "csv";

/// File name for batch number `n`.
pub fn batch_file_name(n: u64) -> String {
    format!("{}{}.{}", BATCH_FILE_PREFIX, n, BATCH_FILE_EXTENSION)
}

/// Extract `N` from `sensor_data_batch_<N>.csv`.
///
/// Only plain positive decimal numbers match; `sensor_data_batch_01.csv`
/// and `sensor_data_batch_1.csv.tmp` do not.
pub fn parse_batch_file_name(name: &str) -> Option<u64> {
    let digits = name
        .strip_prefix(BATCH_FILE_PREFIX)?
        .strip_suffix(BATCH_FILE_EXTENSION)?
        .strip_suffix('.')?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Format a timestamp the way it appears in the `timestamp` column.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a `timestamp` column value.
///
/// Accepts the canonical `Z` form and any RFC 3339 offset, normalized to UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Some(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_header_matches_columns() {
        assert_eq!(CSV_HEADER, CSV_COLUMNS.join(","));
        assert_eq!(CSV_COLUMNS[TIMESTAMP_COLUMN], "timestamp");
    }

    #[test]
    fn test_batch_file_name_roundtrip() {
        assert_eq!(batch_file_name(12), "sensor_data_batch_12.csv");
        assert_eq!(parse_batch_file_name("sensor_data_batch_12.csv"), Some(12));
    }

    #[test]
    fn test_parse_batch_file_name_rejects_near_misses() {
        assert_eq!(parse_batch_file_name("sensor_data_batch_.csv"), None);
        assert_eq!(parse_batch_file_name("sensor_data_batch_01.csv"), None);
        assert_eq!(parse_batch_file_name("sensor_data_batch_0.csv"), None);
        assert_eq!(parse_batch_file_name("sensor_data_batch_3.csv.tmp"), None);
        assert_eq!(parse_batch_file_name("sensor_data_batch_3a.csv"), None);
        assert_eq!(parse_batch_file_name("sensor_data_batch_3csv"), None);
        assert_eq!(parse_batch_file_name("generated_sensor_data.csv"), None);
    }

    #[test]
    fn test_timestamp_format() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-03-07T09:05:02Z");
        assert_eq!(parse_timestamp("2025-03-07T09:05:02Z"), Some(ts));
    }

    #[test]
    fn test_parse_timestamp_normalizes_offsets() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(parse_timestamp("2025-03-07T11:05:02+02:00"), Some(ts));
        assert_eq!(parse_timestamp(" 2025-03-07T09:05:02Z\r"), Some(ts));
        assert_eq!(parse_timestamp("2025-03-07 09:05:02"), None);
        assert_eq!(parse_timestamp("garbage"), None);
    }
}
