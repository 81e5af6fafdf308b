//! Semantic validation of generator settings.
//!
//! Validation runs before the output directory is scanned or created, so a
//! rejected config never leaves anything on disk.

use crate::generator::{GeneratorConfig, MAX_BATCH_ROWS};
use sensorgen_common::id::MAX_GENERATED_MACHINES;
use sensorgen_common::{Error, MachineId, Result};
use std::collections::HashSet;

impl GeneratorConfig {
    /// Check every field; the first violation is returned.
    pub fn validate(&self) -> Result<()> {
        if self.records_per_machine == 0 {
            return Err(invalid("records_per_machine", "must be greater than 0"));
        }

        check_probability("anomaly_probability", self.anomaly_probability)?;
        check_probability("critical_share", self.critical_share)?;

        if self.output_dir.as_os_str().is_empty() {
            return Err(invalid("output_dir", "must not be empty"));
        }

        match &self.machines {
            Some(ids) => check_machine_ids(ids)?,
            None => {
                if self.machine_count == 0 || self.machine_count > MAX_GENERATED_MACHINES {
                    return Err(invalid(
                        "machine_count",
                        format!(
                            "must be between 1 and {}, got {}",
                            MAX_GENERATED_MACHINES, self.machine_count
                        ),
                    ));
                }
            }
        }

        if !self.batch_size().is_some_and(|rows| rows <= MAX_BATCH_ROWS) {
            return Err(invalid(
                "records_per_machine",
                format!(
                    "{} per machine exceeds the limit of {} rows per batch",
                    self.records_per_machine, MAX_BATCH_ROWS
                ),
            ));
        }

        Ok(())
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(invalid(field, format!("must be in [0.0, 1.0], got {}", value)));
    }
    Ok(())
}

fn check_machine_ids(ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(invalid("machines", "must list at least one machine"));
    }

    let mut seen = HashSet::new();
    for id in ids {
        if MachineId::parse(id).is_none() {
            return Err(invalid(
                "machines",
                format!("machine ID {:?} is empty or contains whitespace, commas, or quotes", id),
            ));
        }
        if !seen.insert(id.as_str()) {
            return Err(invalid("machines", format!("duplicate machine ID {:?}", id)));
        }
    }
    Ok(())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidConfig {
        field,
        reason: reason.into(),
    }
}
