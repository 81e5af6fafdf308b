//! Status vocabularies used along the factory pipeline.
//!
//! Three enumerations describe similar concepts at different stages and are
//! deliberately kept apart:
//!
//! | Raw reading ([`StatusCode`]) | Demo stream ([`SensorStatus`]) | Machine health ([`HealthStatus`]) |
//! |------------------------------|--------------------------------|-----------------------------------|
//! | `AOK`                        | `OK`                           | `HEALTHY`                         |
//! | `WARN`                       | `WARNING`                      | `NEEDS_MAINTENANCE`               |
//! | `CRIT`                       | `CRITICAL`                     | `CRITICAL`                        |
//!
//! Each type parses only its own spelling. Conversions go through the
//! explicit `From` impls below.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Per-reading status written to the `status_code` column.
///
/// Ordered by severity, so `max()` over a set of readings gives the worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusCode {
    #[serde(rename = "AOK")]
    Aok,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "CRIT")]
    Crit,
}

impl StatusCode {
    pub const ALL: [StatusCode; 3] = [StatusCode::Aok, StatusCode::Warn, StatusCode::Crit];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Aok => "AOK",
            StatusCode::Warn => "WARN",
            StatusCode::Crit => "CRIT",
        }
    }

    pub fn is_anomalous(self) -> bool {
        self != StatusCode::Aok
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AOK" => Ok(StatusCode::Aok),
            "WARN" => Ok(StatusCode::Warn),
            "CRIT" => Ok(StatusCode::Crit),
            other => Err(format!("unknown status code: {other}")),
        }
    }
}

/// Status vocabulary of the critical-ramp demo stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorStatus {
    Ok,
    Warning,
    Critical,
}

impl SensorStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SensorStatus::Ok => "OK",
            SensorStatus::Warning => "WARNING",
            SensorStatus::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OK" => Ok(SensorStatus::Ok),
            "WARNING" => Ok(SensorStatus::Warning),
            "CRITICAL" => Ok(SensorStatus::Critical),
            other => Err(format!("unknown sensor status: {other}")),
        }
    }
}

impl From<StatusCode> for SensorStatus {
    fn from(code: StatusCode) -> Self {
        match code {
            StatusCode::Aok => SensorStatus::Ok,
            StatusCode::Warn => SensorStatus::Warning,
            StatusCode::Crit => SensorStatus::Critical,
        }
    }
}

impl From<SensorStatus> for StatusCode {
    fn from(status: SensorStatus) -> Self {
        match status {
            SensorStatus::Ok => StatusCode::Aok,
            SensorStatus::Warning => StatusCode::Warn,
            SensorStatus::Critical => StatusCode::Crit,
        }
    }
}

/// Derived machine health shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    NeedsMaintenance,
    Critical,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::NeedsMaintenance => "NEEDS_MAINTENANCE",
            HealthStatus::Critical => "CRITICAL",
        }
    }

    /// Health of a machine given the status codes of its readings.
    ///
    /// The worst reading wins; a machine with no readings is healthy.
    pub fn from_readings<I>(codes: I) -> Self
    where
        I: IntoIterator<Item = StatusCode>,
    {
        codes
            .into_iter()
            .max()
            .map(HealthStatus::from)
            .unwrap_or(HealthStatus::Healthy)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEALTHY" => Ok(HealthStatus::Healthy),
            "NEEDS_MAINTENANCE" => Ok(HealthStatus::NeedsMaintenance),
            "CRITICAL" => Ok(HealthStatus::Critical),
            other => Err(format!("unknown health status: {other}")),
        }
    }
}

impl From<StatusCode> for HealthStatus {
    fn from(code: StatusCode) -> Self {
        match code {
            StatusCode::Aok => HealthStatus::Healthy,
            StatusCode::Warn => HealthStatus::NeedsMaintenance,
            StatusCode::Crit => HealthStatus::Critical,
        }
    }
}

impl From<SensorStatus> for HealthStatus {
    fn from(status: SensorStatus) -> Self {
        HealthStatus::from(StatusCode::from(status))
    }
}
