//! Batch location: where the next batch goes and where its clock starts.
//!
//! The output directory is the only state. Every run rescans it, takes the
//! highest `sensor_data_batch_<N>.csv`, and continues after that file's last
//! row. Nothing else is persisted, so deleting or copying batch files is all
//! it takes to rewind or move a series.
//!
//! Two runs racing on the same directory can both pick the same `N` and the
//! later rename wins. There is no locking; callers that need concurrent
//! generation must give each run its own directory.

use crate::synth::default_start;
use chrono::{DateTime, Utc};
use sensorgen_common::schema::{self, TIMESTAMP_COLUMN};
use sensorgen_common::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// How the continuation timestamp was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSource {
    /// No previous batch; the series starts fresh.
    Fresh,
    /// Read from the last row of the previous batch.
    LastRow,
    /// The previous batch could not be read; one hour before now.
    Fallback,
}

/// Where the next batch goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCursor {
    pub next_batch: u64,
    /// Instant the new batch continues after, if any.
    pub resume_from: Option<DateTime<Utc>>,
    pub source: ResumeSource,
}

impl BatchCursor {
    fn fresh() -> Self {
        Self {
            next_batch: 1,
            resume_from: None,
            source: ResumeSource::Fresh,
        }
    }
}

/// Locate the next batch in `dir`, creating the directory if needed.
pub fn locate(dir: &Path) -> Result<BatchCursor> {
    locate_at(dir, Utc::now())
}

/// [`locate`] with an explicit notion of "now" for the fallback timestamp.
pub fn locate_at(dir: &Path, now: DateTime<Utc>) -> Result<BatchCursor> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "created output directory");
        return Ok(BatchCursor::fresh());
    }

    let Some((last, path)) = latest_batch(dir)? else {
        debug!(dir = %dir.display(), "no previous batches");
        return Ok(BatchCursor::fresh());
    };

    let next_batch = last.checked_add(1).ok_or_else(|| Error::ScanFailed {
        path: path.clone(),
        reason: format!("batch number {} is the largest possible; no next batch", last),
    })?;
    match read_last_timestamp(&path) {
        Ok(ts) => {
            debug!(path = %path.display(), last_timestamp = %ts, "resuming series");
            Ok(BatchCursor {
                next_batch,
                resume_from: Some(ts),
                source: ResumeSource::LastRow,
            })
        }
        Err(e) => {
            let fallback = default_start(now);
            warn!(error = %e, fallback = %fallback, "using fallback start timestamp");
            Ok(BatchCursor {
                next_batch,
                resume_from: Some(fallback),
                source: ResumeSource::Fallback,
            })
        }
    }
}

/// Highest-numbered batch file in `dir`.
///
/// Returns `Ok(None)` when the directory is missing or holds no batches.
pub fn latest_batch(dir: &Path) -> Result<Option<(u64, PathBuf)>> {
    if !dir.exists() {
        return Ok(None);
    }

    let mut latest: Option<(u64, PathBuf)> = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(n) = name.to_str().and_then(schema::parse_batch_file_name) else {
            continue;
        };
        if !entry.file_type()?.is_file() {
            continue;
        }
        if latest.as_ref().map_or(true, |(best, _)| n > *best) {
            latest = Some((n, entry.path()));
        }
    }
    Ok(latest)
}

/// Timestamp of the physically last non-empty row of a batch file.
///
/// Batch files are written sorted, so this is also the newest reading.
pub fn read_last_timestamp(path: &Path) -> Result<DateTime<Utc>> {
    let scan_failed = |reason: String| Error::ScanFailed {
        path: path.to_path_buf(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| scan_failed(e.to_string()))?;
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| scan_failed("file is empty".to_string()))?;
    let column = header
        .split(',')
        .position(|name| name.trim() == schema::CSV_COLUMNS[TIMESTAMP_COLUMN])
        .unwrap_or(TIMESTAMP_COLUMN);

    let row = lines
        .last()
        .ok_or_else(|| scan_failed("no data rows after header".to_string()))?;
    let field = row
        .split(',')
        .nth(column)
        .ok_or_else(|| scan_failed(format!("last row has no column {}", column)))?;

    schema::parse_timestamp(field)
        .ok_or_else(|| scan_failed(format!("unparsable timestamp {:?}", field.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sensorgen_common::schema::{batch_file_name, CSV_HEADER};
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn write_batch(dir: &Path, n: u64, rows: &[&str]) -> PathBuf {
        let path = dir.join(batch_file_name(n));
        let mut content = format!("{}\n", CSV_HEADER);
        for row in rows {
            content.push_str(row);
            content.push('\n');
        }
        fs::write(&path, content).expect("write batch");
        path
    }

    #[test]
    fn test_missing_dir_is_created() {
        let tmp = TempDir::new().expect("tempdir");
        let dir = tmp.path().join("nested").join("data");
        let cursor = locate_at(&dir, now()).expect("locate");
        assert!(dir.is_dir());
        assert_eq!(cursor, BatchCursor::fresh());
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let tmp = TempDir::new().expect("tempdir");
        fs::write(tmp.path().join("generated_sensor_data.csv"), "x").unwrap();
        fs::write(tmp.path().join("sensor_data_batch_9.csv.tmp"), "x").unwrap();
        fs::create_dir(tmp.path().join("sensor_data_batch_5.csv")).unwrap();
        let cursor = locate_at(tmp.path(), now()).expect("locate");
        assert_eq!(cursor, BatchCursor::fresh());
    }

    #[test]
    fn test_numeric_not_lexicographic_max() {
        let tmp = TempDir::new().expect("tempdir");
        write_batch(tmp.path(), 9, &["M001,2025-06-01T09:00:00Z,70.0,0.10,100.0,AOK"]);
        write_batch(tmp.path(), 10, &["M001,2025-06-01T10:00:00Z,70.0,0.10,100.0,AOK"]);
        let cursor = locate_at(tmp.path(), now()).expect("locate");
        assert_eq!(cursor.next_batch, 11);
        assert_eq!(
            cursor.resume_from,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(cursor.source, ResumeSource::LastRow);
    }

    #[test]
    fn test_last_row_in_file_order_wins() {
        let tmp = TempDir::new().expect("tempdir");
        write_batch(
            tmp.path(),
            1,
            &[
                "M002,2025-06-01T10:00:00Z,70.0,0.10,100.0,AOK",
                "M001,2025-06-01T10:00:07Z,70.0,0.10,100.0,WARN",
                "",
            ],
        );
        let cursor = locate_at(tmp.path(), now()).expect("locate");
        assert_eq!(cursor.next_batch, 2);
        assert_eq!(
            cursor.resume_from,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 7).unwrap())
        );
    }

    #[test]
    fn test_corrupt_last_row_falls_back() {
        let tmp = TempDir::new().expect("tempdir");
        write_batch(tmp.path(), 3, &["M001,not-a-time,70.0,0.10,100.0,AOK"]);
        let cursor = locate_at(tmp.path(), now()).expect("locate");
        assert_eq!(cursor.next_batch, 4);
        assert_eq!(cursor.source, ResumeSource::Fallback);
        assert_eq!(
            cursor.resume_from,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_exhausted_batch_numbers_are_an_error() {
        let tmp = TempDir::new().expect("tempdir");
        write_batch(tmp.path(), u64::MAX, &["M001,2025-06-01T10:00:00Z,70.0,0.10,100.0,AOK"]);
        let err = locate_at(tmp.path(), now()).unwrap_err();
        assert!(matches!(err, Error::ScanFailed { .. }), "{err:?}");
        assert!(!tmp.path().join(batch_file_name(0)).exists());
    }

    #[test]
    fn test_header_only_and_empty_files_fall_back() {
        let tmp = TempDir::new().expect("tempdir");
        write_batch(tmp.path(), 1, &[]);
        let cursor = locate_at(tmp.path(), now()).expect("locate");
        assert_eq!((cursor.next_batch, cursor.source), (2, ResumeSource::Fallback));

        fs::write(tmp.path().join(batch_file_name(2)), "").unwrap();
        let cursor = locate_at(tmp.path(), now()).expect("locate");
        assert_eq!((cursor.next_batch, cursor.source), (3, ResumeSource::Fallback));
    }

    #[test]
    fn test_read_last_timestamp_reports_scan_failure() {
        let tmp = TempDir::new().expect("tempdir");
        let path = write_batch(tmp.path(), 1, &["M001"]);
        let err = read_last_timestamp(&path).unwrap_err();
        assert!(matches!(err, Error::ScanFailed { .. }), "{err:?}");
    }

    #[test]
    fn test_timestamp_column_found_by_header() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join(batch_file_name(1));
        fs::write(
            &path,
            "timestamp,machine_id\n2025-06-01T10:00:00Z,M001\n2025-06-01T10:00:05Z,M002\n",
        )
        .unwrap();
        assert_eq!(
            read_last_timestamp(&path).expect("parse"),
            Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 5).unwrap()
        );
    }

    #[test]
    fn test_latest_batch_on_missing_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("missing");
        assert_eq!(latest_batch(&missing).expect("latest"), None);
        assert!(!missing.exists(), "latest_batch must not create the directory");
    }

    #[test]
    fn test_output_dir_is_a_file() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("data");
        fs::write(&file, "not a dir").unwrap();
        let err = locate_at(&file, now()).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "{err:?}");
    }
}
