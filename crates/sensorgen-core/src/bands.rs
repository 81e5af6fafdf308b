//! Value bands for each channel and severity.
//!
//! The literal constants below are the single source of truth for both
//! sampling and threshold checks. Warning bands sit strictly between the
//! normal band and the critical band of the same channel, so the severity of
//! a reading can be read back from its values after rounding.

use crate::reading::{Channel, SensorReading};
use rand::Rng;
use sensorgen_common::StatusCode;

/// Closed interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Uniform sample in `[low, high]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.random_range(self.low..=self.high)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

pub const TEMPERATURE_NORMAL: Band = Band::new(65.0, 80.0);
pub const VIBRATION_NORMAL: Band = Band::new(0.01, 0.2);
pub const PRESSURE_NORMAL: Band = Band::new(98.0, 102.0);

pub const TEMPERATURE_WARNING: [Band; 1] = [Band::new(85.0, 94.9)];
pub const VIBRATION_WARNING: [Band; 1] = [Band::new(0.5, 0.79)];
pub const PRESSURE_WARNING: [Band; 2] = [Band::new(105.0, 109.9), Band::new(92.1, 95.0)];

pub const TEMPERATURE_CRITICAL: [Band; 1] = [Band::new(95.0, 105.0)];
pub const VIBRATION_CRITICAL: [Band; 1] = [Band::new(0.8, 1.3)];
pub const PRESSURE_CRITICAL: [Band; 2] = [Band::new(110.0, 115.0), Band::new(87.0, 92.0)];

/// Severity of an injected excursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Critical,
}

/// Baseline band for a channel.
pub fn normal_band(channel: Channel) -> Band {
    match channel {
        Channel::Temperature => TEMPERATURE_NORMAL,
        Channel::Vibration => VIBRATION_NORMAL,
        Channel::Pressure => PRESSURE_NORMAL,
    }
}

/// Excursion bands for a channel. Channels with two bands (pressure) pick
/// high or low with equal probability.
pub fn excursion_bands(channel: Channel, severity: Severity) -> &'static [Band] {
    match (channel, severity) {
        (Channel::Temperature, Severity::Warning) => &TEMPERATURE_WARNING,
        (Channel::Vibration, Severity::Warning) => &VIBRATION_WARNING,
        (Channel::Pressure, Severity::Warning) => &PRESSURE_WARNING,
        (Channel::Temperature, Severity::Critical) => &TEMPERATURE_CRITICAL,
        (Channel::Vibration, Severity::Critical) => &VIBRATION_CRITICAL,
        (Channel::Pressure, Severity::Critical) => &PRESSURE_CRITICAL,
    }
}

/// Sample one excursion value for `channel`.
pub fn sample_excursion<R: Rng + ?Sized>(channel: Channel, severity: Severity, rng: &mut R) -> f64 {
    let bands = excursion_bands(channel, severity);
    let band = if bands.len() == 1 {
        bands[0]
    } else {
        bands[rng.random_range(0..bands.len())]
    };
    band.sample(rng)
}

/// Whether a (rounded) value crosses the critical threshold of its channel.
pub fn is_critical_value(channel: Channel, value: f64) -> bool {
    match channel {
        Channel::Temperature => value >= 95.0,
        Channel::Vibration => value >= 0.8,
        Channel::Pressure => value >= 110.0 || value <= 92.0,
    }
}

/// Whether a (rounded) value crosses the warning threshold of its channel.
/// True for critical values as well.
pub fn is_warning_value(channel: Channel, value: f64) -> bool {
    match channel {
        Channel::Temperature => value >= 85.0,
        Channel::Vibration => value >= 0.5,
        Channel::Pressure => value >= 105.0 || value <= 95.0,
    }
}

/// Status a reading's values imply under the fixed thresholds.
///
/// The generator never uses this to assign `status_code`; it exists so
/// consumers and tests can check the two agree.
pub fn classify(reading: &SensorReading) -> StatusCode {
    let values = Channel::ALL.map(|c| (c, reading.value(c)));
    if values.iter().any(|&(c, v)| is_critical_value(c, v)) {
        StatusCode::Crit
    } else if values.iter().any(|&(c, v)| is_warning_value(c, v)) {
        StatusCode::Warn
    } else {
        StatusCode::Aok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::round_to;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bands_are_well_formed() {
        for channel in Channel::ALL {
            let normal = normal_band(channel);
            assert!(normal.low < normal.high, "{channel} normal band inverted");
            for severity in [Severity::Warning, Severity::Critical] {
                for band in excursion_bands(channel, severity) {
                    assert!(band.low < band.high, "{channel} {severity:?} band inverted");
                    assert!(
                        !band.contains(normal.low) && !band.contains(normal.high),
                        "{channel} {severity:?} band overlaps normal"
                    );
                }
            }
        }
    }

    #[test]
    fn test_warning_strictly_below_critical() {
        for channel in Channel::ALL {
            for warn in excursion_bands(channel, Severity::Warning) {
                for crit in excursion_bands(channel, Severity::Critical) {
                    assert!(
                        warn.high < crit.low || warn.low > crit.high,
                        "{channel}: warning {warn:?} overlaps critical {crit:?}"
                    );
                }
                // Rounded endpoints stay on the warning side.
                let digits = channel.decimals();
                for edge in [warn.low, warn.high] {
                    let v = round_to(edge, digits);
                    assert!(is_warning_value(channel, v));
                    assert!(!is_critical_value(channel, v), "{channel} edge {v}");
                }
            }
            for crit in excursion_bands(channel, Severity::Critical) {
                for edge in [crit.low, crit.high] {
                    assert!(is_critical_value(channel, round_to(edge, channel.decimals())));
                }
            }
            let normal = normal_band(channel);
            for edge in [normal.low, normal.high] {
                assert!(!is_warning_value(channel, round_to(edge, channel.decimals())));
            }
        }
    }

    #[test]
    fn test_pressure_excursions_use_both_sides() {
        let mut rng = StdRng::seed_from_u64(11);
        let (mut high, mut low) = (0, 0);
        for _ in 0..400 {
            let v = sample_excursion(Channel::Pressure, Severity::Critical, &mut rng);
            if v >= 110.0 {
                high += 1;
            } else {
                assert!(v <= 92.0);
                low += 1;
            }
        }
        assert!(high > 120 && low > 120, "high={high} low={low}");
    }

    #[test]
    fn test_samples_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let v = TEMPERATURE_NORMAL.sample(&mut rng);
            assert!(TEMPERATURE_NORMAL.contains(v));
            let v = sample_excursion(Channel::Vibration, Severity::Warning, &mut rng);
            assert!(VIBRATION_WARNING[0].contains(v));
        }
    }
}
