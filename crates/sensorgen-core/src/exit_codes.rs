//! Exit codes for the sensorgen CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//! Argument syntax errors are reported by clap itself with exit code 2.

use sensorgen_common::Error;

/// Exit codes for sensorgen operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Batch written / query answered
    Clean = 0,

    /// `latest` found no batch files
    NoBatches = 1,

    /// Configuration error (bad value, unreadable config file)
    ConfigError = 10,

    /// I/O error (directory or batch file could not be written)
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Exit code for a failed run.
    pub fn for_error(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::InvalidConfig { .. } => ExitCode::ConfigError,
            Error::Io(_) | Error::WriteFailed { .. } => ExitCode::IoError,
            Error::ScanFailed { .. } | Error::Json(_) => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            ExitCode::for_error(&Error::Config("bad".into())),
            ExitCode::ConfigError
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        assert_eq!(ExitCode::for_error(&Error::Io(io)), ExitCode::IoError);
        assert_eq!(i32::from(ExitCode::IoError), 13);
        assert_eq!(ExitCode::NoBatches.as_i32(), 1);
    }
}
