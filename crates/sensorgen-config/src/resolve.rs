//! Config resolution: explicit overrides → config file → built-in defaults.
//!
//! Environment variables are folded into the overrides by the CLI layer
//! (clap `env`), so by the time they reach here a flag and its variable are
//! indistinguishable.

use crate::generator::GeneratorConfig;
use sensorgen_common::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub records_per_machine: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub anomaly_probability: Option<f64>,
    pub machine_count: Option<usize>,
    pub seed: Option<u64>,
}

impl ConfigOverrides {
    /// Apply every set override on top of `base`.
    pub fn apply(&self, mut base: GeneratorConfig) -> GeneratorConfig {
        if let Some(n) = self.records_per_machine {
            base.records_per_machine = n;
        }
        if let Some(dir) = &self.output_dir {
            base.output_dir = dir.clone();
        }
        if let Some(p) = self.anomaly_probability {
            base.anomaly_probability = p;
        }
        if let Some(count) = self.machine_count {
            // An explicit count on the command line beats a machine list
            // inherited from the config file.
            base.machine_count = count;
            base.machines = None;
        }
        if let Some(seed) = self.seed {
            base.seed = Some(seed);
        }
        base
    }
}

/// Build the effective config and validate it.
pub fn resolve_config(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<GeneratorConfig> {
    let base = match config_file {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            GeneratorConfig::from_file(path)?
        }
        None => GeneratorConfig::default(),
    };

    let config = overrides.apply(base);
    config.validate()?;
    debug!(
        records_per_machine = config.records_per_machine,
        anomaly_probability = config.anomaly_probability,
        output_dir = %config.output_dir.display(),
        "config resolved"
    );
    Ok(config)
}
