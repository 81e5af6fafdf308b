//! CSV batch writer.
//!
//! Rows go to a sibling `*.tmp` file that is flushed, synced, and renamed
//! over the destination. A failed write therefore never leaves a file the
//! batch locator would pick up.

use crate::reading::SensorReading;
use sensorgen_common::schema::{format_timestamp, CSV_HEADER};
use sensorgen_common::{Error, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Render one reading as a CSV row (no trailing newline).
pub fn format_row(reading: &SensorReading) -> String {
    format!(
        "{},{},{:.1},{:.2},{:.1},{}",
        reading.machine_id,
        format_timestamp(&reading.timestamp),
        reading.temperature,
        reading.vibration,
        reading.pressure,
        reading.status_code,
    )
}

/// Write `readings` to `path` with the fixed header and return the path.
pub fn write_batch(readings: &[SensorReading], path: &Path) -> Result<PathBuf> {
    let write_failed = |source: std::io::Error| Error::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }

    let tmp_path = tmp_path_for(path);
    if let Err(e) = write_rows(readings, &tmp_path) {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            warn!(path = %tmp_path.display(), error = %cleanup, "failed to remove partial batch");
        }
        return Err(write_failed(e));
    }
    fs::rename(&tmp_path, path).map_err(write_failed)?;

    debug!(path = %path.display(), records = readings.len(), "batch written");
    Ok(path.to_path_buf())
}

fn write_rows(readings: &[SensorReading], tmp_path: &Path) -> std::io::Result<()> {
    let file = File::create(tmp_path)?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{}", CSV_HEADER)?;
    for reading in readings {
        writeln!(out, "{}", format_row(reading))?;
    }
    let file = out.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
