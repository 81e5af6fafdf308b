//! Machine identity types.
//!
//! Machine IDs are opaque, non-empty strings. The generated population uses
//! `M` followed by a three-digit, zero-padded index (`M001`..`M999`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of the default machine population.
pub const DEFAULT_MACHINE_COUNT: usize = 10;

/// Largest population that still fits the three-digit ID format.
pub const MAX_GENERATED_MACHINES: usize = 999;

/// Machine identifier as it appears in the `machine_id` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(pub String);

impl MachineId {
    /// Build the generated ID for a 1-based population index.
    pub fn from_index(index: usize) -> Self {
        MachineId(format!("M{:03}", index))
    }

    /// Parse and validate a user-supplied ID.
    ///
    /// Rejects empty IDs and IDs that would need quoting in a CSV field
    /// (whitespace, commas, double quotes).
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == ',' || c == '"') {
            None
        } else {
            Some(MachineId(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MachineId {
    fn from(s: &str) -> Self {
        MachineId(s.to_string())
    }
}

/// Generated machine population `M001`..`M<count>`.
pub fn default_machines(count: usize) -> Vec<MachineId> {
    (1..=count).map(MachineId::from_index).collect()
}
