//! Configuration snapshots for run provenance.
//!
//! A snapshot captures the configuration in effect when a run started, so a
//! written model.csv can be traced back to the settings that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::model::ModelConfig;
use crate::resolve::{ConfigPath, ConfigSource};

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// SHA-256 hash of the model.json content, when a file was loaded.
    #[serde(default)]
    pub config_hash: Option<String>,

    /// Path the config was loaded from.
    #[serde(default)]
    pub config_path: Option<String>,

    /// Source of the configuration.
    pub config_source: String,

    /// Effective values.
    pub config: ModelConfig,
}

impl ConfigSnapshot {
    /// Create a new snapshot from a loaded configuration.
    pub fn new(config: &ModelConfig, path: &ConfigPath, raw_json: Option<&str>) -> Self {
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: config.schema_version.clone(),
            config_hash: raw_json.map(hash_content),
            config_path: path.path.as_ref().map(|p| p.display().to_string()),
            config_source: path.source.to_string(),
            config: config.clone(),
        }
    }

    /// Create a snapshot with only defaults (no config file loaded).
    pub fn defaults_only() -> Self {
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            config_hash: None,
            config_path: None,
            config_source: ConfigSource::BuiltinDefault.to_string(),
            config: ModelConfig::default(),
        }
    }

    /// First 12 hex characters of the config hash, or `defaults`.
    pub fn short_id(&self) -> String {
        match &self.config_hash {
            Some(hash) => hash.chars().take(12).collect(),
            None => "defaults".to_string(),
        }
    }

    /// Check whether another snapshot was taken from identical content.
    pub fn matches(&self, other: &ConfigSnapshot) -> bool {
        self.config_hash == other.config_hash && self.config == other.config
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Compute SHA-256 hash of content.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
