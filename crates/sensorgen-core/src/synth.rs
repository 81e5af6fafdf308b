//! Record synthesis.
//!
//! Produces one batch worth of readings: every machine gets exactly
//! `records_per_machine` rows, machines are interleaved at random, and the
//! clock advances by a small random step before each row so the batch forms
//! a single, gently widening time series.

use crate::bands;
use crate::reading::{Anomaly, SensorReading};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::Rng;
use sensorgen_common::MachineId;
use sensorgen_config::generator::MAX_BATCH_ROWS;
use sensorgen_config::GeneratorConfig;
use std::collections::HashSet;
use tracing::debug;

/// Shortest gap between consecutive readings, in seconds.
pub const MIN_STEP_SECS: i64 = 1;

/// Longest gap at the start of a batch, in seconds.
pub const BASE_MAX_STEP_SECS: i64 = 15;

/// The longest gap grows by one second every this many readings.
pub const STEP_GROWTH_EVERY: i64 = 10;

/// Inputs for one batch.
#[derive(Debug, Clone)]
pub struct SynthParams {
    pub records_per_machine: usize,
    pub machines: Vec<MachineId>,
    pub anomaly_probability: f64,
    pub critical_share: f64,
    /// Readings are strictly after this instant.
    pub start: DateTime<Utc>,
}

impl SynthParams {
    /// Params for `config`, continuing after `start`.
    pub fn from_config(config: &GeneratorConfig, start: DateTime<Utc>) -> Self {
        Self {
            records_per_machine: config.records_per_machine,
            machines: config.machine_set(),
            anomaly_probability: config.anomaly_probability,
            critical_share: config.critical_share,
            start,
        }
    }
}

/// Default start of a fresh series: one hour ago, whole seconds.
pub fn default_start(now: DateTime<Utc>) -> DateTime<Utc> {
    (now - Duration::hours(1)).trunc_subsecs(0)
}

/// Upper bound of the clock step before reading number `emitted`.
pub fn max_step_secs(emitted: usize) -> i64 {
    BASE_MAX_STEP_SECS + emitted as i64 / STEP_GROWTH_EVERY
}

/// Generate one batch of readings sorted by timestamp.
///
/// Duplicate machine IDs are collapsed so each machine's quota is exact.
pub fn synthesize<R: Rng + ?Sized>(params: &SynthParams, rng: &mut R) -> Vec<SensorReading> {
    let mut seen = HashSet::new();
    let machines: Vec<&MachineId> = params
        .machines
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .collect();

    let target = params.records_per_machine.saturating_mul(machines.len());
    let mut available: Vec<usize> = (0..machines.len()).collect();
    let mut emitted = vec![0usize; machines.len()];
    let mut readings = Vec::with_capacity(target.min(MAX_BATCH_ROWS));
    let mut clock = params.start.trunc_subsecs(0);

    while !available.is_empty() && readings.len() < target {
        let slot = rng.random_range(0..available.len());
        let machine = available[slot];

        let step = rng.random_range(MIN_STEP_SECS..=max_step_secs(readings.len()));
        clock += Duration::seconds(step);

        let anomaly = Anomaly::sample(params.anomaly_probability, params.critical_share, rng);
        let reading = SensorReading::sample(machines[machine].clone(), clock, anomaly, rng);
        debug_assert_eq!(bands::classify(&reading), reading.status_code);
        readings.push(reading);

        emitted[machine] += 1;
        if emitted[machine] >= params.records_per_machine {
            available.swap_remove(slot);
        }
    }

    readings.sort_by_key(|r| r.timestamp);

    debug!(
        records = readings.len(),
        machines = machines.len(),
        start = %params.start,
        "batch synthesized"
    );
    readings
}
