//! sensorgen core: synthetic factory sensor batches.
//!
//! One run scans the output directory for earlier batches ([`locate`]),
//! synthesizes a new batch that continues their time series ([`synth`]),
//! and writes it as `sensor_data_batch_<N>.csv` ([`writer`]). [`run`] ties
//! the three together.

pub mod bands;
pub mod cli;
pub mod exit_codes;
pub mod locate;
pub mod logging;
pub mod reading;
pub mod run;
pub mod synth;
pub mod writer;

pub use locate::{latest_batch, locate, BatchCursor, ResumeSource};
pub use reading::{Anomaly, Channel, SensorReading};
pub use run::{generate_batch, BatchSummary, StatusCounts};
pub use synth::{synthesize, SynthParams};
pub use writer::write_batch;
