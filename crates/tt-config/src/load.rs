//! One-call configuration loading: resolve, parse, validate, snapshot.

use std::path::Path;

use crate::model::ModelConfig;
use crate::resolve::{resolve_config, ConfigPath};
use crate::snapshot::ConfigSnapshot;
use crate::validate::{validate_model_config, ValidationError, ValidationResult};

/// A validated configuration plus its provenance.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: ModelConfig,
    pub path: ConfigPath,
    pub snapshot: ConfigSnapshot,
}

/// Resolve, read, and validate model.json.
///
/// Falls back to [`ModelConfig::default`] when no file is found anywhere in
/// the resolution chain. An explicit CLI path that cannot be read is an error.
pub fn load_model_config(cli_path: Option<&Path>) -> ValidationResult<LoadedConfig> {
    let path = resolve_config(cli_path);

    let Some(file) = path.path.as_deref() else {
        return Ok(LoadedConfig {
            config: ModelConfig::default(),
            snapshot: ConfigSnapshot::defaults_only(),
            path,
        });
    };

    let raw = std::fs::read_to_string(file).map_err(|e| {
        ValidationError::IoError(format!("Failed to read {}: {}", file.display(), e))
    })?;
    let config = ModelConfig::from_json(&raw)?;
    validate_model_config(&config)?;

    let snapshot = ConfigSnapshot::new(&config, &path, Some(&raw));
    Ok(LoadedConfig {
        config,
        path,
        snapshot,
    })
}
