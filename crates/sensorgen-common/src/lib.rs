//! sensorgen common types, IDs, and errors.
//!
//! This crate provides foundational types shared across the sensorgen crates:
//! - Machine identity with zero-padded default population
//! - The three status vocabularies used along the factory pipeline
//! - CSV schema constants and timestamp formatting
//! - Common error types

pub mod error;
pub mod id;
pub mod schema;
pub mod status;

pub use error::{Error, Result};
pub use id::{default_machines, MachineId};
pub use schema::{CSV_HEADER, SCHEMA_VERSION, TIMESTAMP_FORMAT};
pub use status::{HealthStatus, SensorStatus, StatusCode};
