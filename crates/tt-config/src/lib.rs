//! Time Triage configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for model.json
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation (split fractions, bundle span, cadence)
//! - Config snapshots for run provenance

pub mod load;
pub mod model;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use load::{load_model_config, LoadedConfig};
pub use model::{ModelConfig, SplitFractions};
pub use resolve::{resolve_config, ConfigPath, ConfigSource};
pub use snapshot::ConfigSnapshot;
pub use validate::{ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
