//! sensorgen configuration loading and validation.
//!
//! This crate provides:
//! - The typed [`GeneratorConfig`] with built-in defaults
//! - JSON config file loading
//! - Layered resolution (CLI/env overrides → config file → defaults)
//! - Semantic validation, run before any file is touched

pub mod generator;
pub mod resolve;
pub mod validate;

pub use generator::GeneratorConfig;
pub use resolve::{resolve_config, ConfigOverrides};
