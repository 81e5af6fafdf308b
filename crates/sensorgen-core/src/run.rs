//! One generator invocation: locate, synthesize, write.

use crate::locate::{locate_at, ResumeSource};
use crate::reading::SensorReading;
use crate::synth::{default_start, synthesize, SynthParams};
use crate::writer::write_batch;
use chrono::{DateTime, Utc};
use rand::Rng;
use sensorgen_common::schema::{batch_file_name, format_timestamp};
use sensorgen_common::{HealthStatus, Result, StatusCode, SCHEMA_VERSION};
use sensorgen_config::GeneratorConfig;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::info;

/// Per-status row counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub aok: usize,
    pub warn: usize,
    pub crit: usize,
}

impl StatusCounts {
    pub fn tally(readings: &[SensorReading]) -> Self {
        let mut counts = Self::default();
        for r in readings {
            match r.status_code {
                StatusCode::Aok => counts.aok += 1,
                StatusCode::Warn => counts.warn += 1,
                StatusCode::Crit => counts.crit += 1,
            }
        }
        counts
    }

    pub fn anomalous(&self) -> usize {
        self.warn + self.crit
    }
}

/// What a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub schema_version: &'static str,
    pub batch_number: u64,
    pub path: PathBuf,
    pub records: usize,
    pub machines: usize,
    pub status_counts: StatusCounts,
    /// Worst-reading health per machine in this batch.
    pub machine_health: BTreeMap<String, HealthStatus>,
    pub first_timestamp: Option<String>,
    pub last_timestamp: Option<String>,
    pub resumed_from: Option<String>,
    pub resume_source: ResumeSource,
}

impl BatchSummary {
    /// Plain-text report printed after a successful run.
    pub fn render_text(&self) -> String {
        format!(
            "Generated {} records and saved to {}\n\
             \n\
             Next steps:\n\
             1. Upload the file to object storage to trigger ingestion:\n   \
                python setup/03_upload_file.py --file {}\n\
             2. Check the pipeline status:\n   \
                python setup/check_pipeline_status.py",
            self.records,
            self.path.display(),
            self.path.display(),
        )
    }
}

/// Generate and write the next batch for `config`.
///
/// `now` anchors the default start of a fresh series and the fallback used
/// when the previous batch is unreadable. The config is validated first, so
/// nothing is scanned or created for a rejected config.
pub fn generate_batch<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<BatchSummary> {
    config.validate()?;
    let cursor = locate_at(&config.output_dir, now)?;
    let start = cursor.resume_from.unwrap_or_else(|| default_start(now));

    let params = SynthParams::from_config(config, start);
    let readings = synthesize(&params, rng);

    let path = config.output_dir.join(batch_file_name(cursor.next_batch));
    let path = write_batch(&readings, &path)?;

    let summary = summarize(cursor.next_batch, path, &readings, cursor.resume_from, cursor.source);
    info!(
        batch = summary.batch_number,
        records = summary.records,
        warn = summary.status_counts.warn,
        crit = summary.status_counts.crit,
        path = %summary.path.display(),
        "batch generated"
    );
    Ok(summary)
}

fn summarize(
    batch_number: u64,
    path: PathBuf,
    readings: &[SensorReading],
    resumed_from: Option<DateTime<Utc>>,
    resume_source: ResumeSource,
) -> BatchSummary {
    let mut by_machine: BTreeMap<String, Vec<StatusCode>> = BTreeMap::new();
    for r in readings {
        by_machine
            .entry(r.machine_id.to_string())
            .or_default()
            .push(r.status_code);
    }
    let machine_health = by_machine
        .into_iter()
        .map(|(id, codes)| (id, HealthStatus::from_readings(codes)))
        .collect::<BTreeMap<_, _>>();

    BatchSummary {
        schema_version: SCHEMA_VERSION,
        batch_number,
        path,
        records: readings.len(),
        machines: machine_health.len(),
        status_counts: StatusCounts::tally(readings),
        machine_health,
        first_timestamp: readings.first().map(|r| format_timestamp(&r.timestamp)),
        last_timestamp: readings.last().map(|r| format_timestamp(&r.timestamp)),
        resumed_from: resumed_from.map(|ts| format_timestamp(&ts)),
        resume_source,
    }
}
