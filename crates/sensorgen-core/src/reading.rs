//! Sensor readings and the anomaly model.

use crate::bands::{self, Severity};
use chrono::{DateTime, Utc};
use rand::Rng;
use sensorgen_common::{MachineId, StatusCode};
use std::fmt;

/// One of the three measured quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Temperature,
    Vibration,
    Pressure,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Temperature, Channel::Vibration, Channel::Pressure];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::Vibration => "vibration",
            Channel::Pressure => "pressure",
        }
    }

    /// Position in [`Channel::ALL`] and in the CSV value columns.
    pub fn index(self) -> usize {
        match self {
            Channel::Temperature => 0,
            Channel::Vibration => 1,
            Channel::Pressure => 2,
        }
    }

    /// Fractional digits kept for this channel.
    pub fn decimals(self) -> i32 {
        match self {
            Channel::Vibration => 2,
            Channel::Temperature | Channel::Pressure => 1,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a reading carries, decided before any value is sampled.
///
/// At most one channel is pushed out of its normal band, and the status code
/// follows from the variant alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anomaly {
    Normal,
    Warning(Channel),
    Critical(Channel),
}

impl Anomaly {
    /// Draw an anomaly: anomalous with `probability`, then critical with
    /// `critical_share`, then a channel uniformly.
    pub fn sample<R: Rng + ?Sized>(probability: f64, critical_share: f64, rng: &mut R) -> Self {
        if rng.random::<f64>() >= probability {
            return Anomaly::Normal;
        }
        let critical = rng.random::<f64>() < critical_share;
        let channel = Channel::ALL[rng.random_range(0..Channel::ALL.len())];
        if critical {
            Anomaly::Critical(channel)
        } else {
            Anomaly::Warning(channel)
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            Anomaly::Normal => StatusCode::Aok,
            Anomaly::Warning(_) => StatusCode::Warn,
            Anomaly::Critical(_) => StatusCode::Crit,
        }
    }

    fn excursion(self) -> Option<(Channel, Severity)> {
        match self {
            Anomaly::Normal => None,
            Anomaly::Warning(c) => Some((c, Severity::Warning)),
            Anomaly::Critical(c) => Some((c, Severity::Critical)),
        }
    }
}

/// One row of a batch file.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub machine_id: MachineId,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub vibration: f64,
    pub pressure: f64,
    pub status_code: StatusCode,
}

impl SensorReading {
    /// Sample values for `anomaly` and build the rounded reading.
    pub fn sample<R: Rng + ?Sized>(
        machine_id: MachineId,
        timestamp: DateTime<Utc>,
        anomaly: Anomaly,
        rng: &mut R,
    ) -> Self {
        let mut values = Channel::ALL.map(|c| bands::normal_band(c).sample(&mut *rng));
        if let Some((channel, severity)) = anomaly.excursion() {
            values[channel.index()] = bands::sample_excursion(channel, severity, rng);
        }
        let [temperature, vibration, pressure] = values;

        Self {
            machine_id,
            timestamp,
            temperature: round_to(temperature, Channel::Temperature.decimals()),
            vibration: round_to(vibration, Channel::Vibration.decimals()),
            pressure: round_to(pressure, Channel::Pressure.decimals()),
            status_code: anomaly.status_code(),
        }
    }

    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Vibration => self.vibration,
            Channel::Pressure => self.pressure,
        }
    }
}

/// Round half away from zero to `digits` fractional digits.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}
