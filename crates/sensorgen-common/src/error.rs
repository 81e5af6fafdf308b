//! Error types for sensorgen.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sensorgen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for sensorgen.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    // Batch scan errors (20-29)
    #[error("could not recover last timestamp from {path}: {reason}")]
    ScanFailed { path: PathBuf, reason: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidConfig { .. } => 11,
            Error::ScanFailed { .. } => 20,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
            Error::WriteFailed { .. } => 62,
        }
    }

    /// True for errors caused by bad user input rather than the environment.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_) | Error::InvalidConfig { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_group_by_category() {
        assert_eq!(Error::Config("x".into()).code(), 10);
        assert_eq!(
            Error::InvalidConfig {
                field: "anomaly_probability",
                reason: "out of range".into()
            }
            .code(),
            11
        );
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(Error::from(io).code(), 60);
    }

    #[test]
    fn test_invalid_config_message_names_field() {
        let err = Error::InvalidConfig {
            field: "records_per_machine",
            reason: "must be greater than 0".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for records_per_machine: must be greater than 0"
        );
        assert!(err.is_config());
    }
}
