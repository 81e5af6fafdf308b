//! Generator configuration.

use sensorgen_common::id::DEFAULT_MACHINE_COUNT;
use sensorgen_common::{default_machines, Error, MachineId, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default readings per machine per batch.
pub const DEFAULT_RECORDS_PER_MACHINE: usize = 10;

/// Default per-reading anomaly probability.
pub const DEFAULT_ANOMALY_PROBABILITY: f64 = 0.15;

/// Default share of anomalies that are critical rather than warnings.
pub const DEFAULT_CRITICAL_SHARE: f64 = 0.3;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Upper bound on rows in one batch (`records_per_machine` times machines).
pub const MAX_BATCH_ROWS: usize = 10_000_000;

/// Everything a single generator run needs.
///
/// Every field may be omitted from a config file; missing fields take the
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Readings emitted for each machine in one batch.
    pub records_per_machine: usize,

    /// Directory scanned for previous batches and written to.
    pub output_dir: PathBuf,

    /// Chance that a reading carries an anomaly (0.0–1.0).
    pub anomaly_probability: f64,

    /// Fraction of anomalies that are critical (0.0–1.0).
    pub critical_share: f64,

    /// Explicit machine IDs. Takes precedence over `machine_count`.
    pub machines: Option<Vec<String>>,

    /// Size of the generated `M001`.. population when `machines` is unset.
    pub machine_count: usize,

    /// Seed for the random source; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            records_per_machine: DEFAULT_RECORDS_PER_MACHINE,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            anomaly_probability: DEFAULT_ANOMALY_PROBABILITY,
            critical_share: DEFAULT_CRITICAL_SHARE,
            machines: None,
            machine_count: DEFAULT_MACHINE_COUNT,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid JSON in {}: {}", path.display(), e)))
    }

    /// Parse a config from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(format!("invalid JSON: {}", e)))
    }

    /// The machine set this config describes, in configured order.
    pub fn machine_set(&self) -> Vec<MachineId> {
        match &self.machines {
            Some(ids) => ids.iter().map(|id| MachineId(id.clone())).collect(),
            None => default_machines(self.machine_count),
        }
    }

    /// Total number of readings one batch will contain, or `None` if the
    /// product does not fit in `usize`.
    pub fn batch_size(&self) -> Option<usize> {
        self.records_per_machine.checked_mul(self.machine_set().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.records_per_machine, 10);
        assert_eq!(config.output_dir, PathBuf::from("data"));
        assert!((config.anomaly_probability - 0.15).abs() < 1e-12);
        assert!((config.critical_share - 0.3).abs() < 1e-12);
        assert_eq!(config.machine_set().len(), 10);
        assert_eq!(config.batch_size(), Some(100));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = GeneratorConfig::parse_json(r#"{"records_per_machine": 3, "seed": 7}"#)
            .expect("parse");
        assert_eq!(config.records_per_machine, 3);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let err = GeneratorConfig::parse_json(r#"{"records": 100}"#).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("records"));
    }

    #[test]
    fn test_explicit_machines_take_precedence() {
        let config = GeneratorConfig {
            machines: Some(vec!["PRESS-1".into(), "LATHE-2".into()]),
            machine_count: 50,
            ..GeneratorConfig::default()
        };
        let set = config.machine_set();
        assert_eq!(set, vec![MachineId::from("PRESS-1"), MachineId::from("LATHE-2")]);
        assert_eq!(config.batch_size(), Some(20));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(file, r#"{{"anomaly_probability": 0.5, "output_dir": "/tmp/out"}}"#)
            .expect("write");
        let config = GeneratorConfig::from_file(file.path()).expect("load");
        assert!((config.anomaly_probability - 0.5).abs() < 1e-12);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_from_missing_file_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = GeneratorConfig::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.is_config());
    }
}
