//! Model configuration types.
//!
//! These types match the model.json file. Every field except
//! `schema_version` has a default, so a minimal file is just
//! `{"schema_version": "1.0.0"}`.

use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, ValidationResult};

/// Tolerance when checking that split fractions add up to one.
pub const SPLIT_SUM_TOLERANCE: f64 = 1e-9;

/// Complete model configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Number of calendar-day transitions that close a bundle.
    #[serde(default = "default_day_span")]
    pub day_span: u32,

    /// Number of bootstrap samples drawn by the resampler.
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Resampler RNG seed. A random seed is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub split: SplitFractions,

    /// Drop bundles that contain only one class before resampling.
    #[serde(default)]
    pub exclude_single_class_bundles: bool,

    /// Emit a progress event every N entries within a bundle.
    #[serde(default = "default_report_every")]
    pub report_every: usize,
}

fn default_day_span() -> u32 {
    7
}

fn default_samples() -> usize {
    100
}

fn default_report_every() -> usize {
    50
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            day_span: default_day_span(),
            samples: default_samples(),
            seed: None,
            split: SplitFractions::default(),
            exclude_single_class_bundles: false,
            report_every: default_report_every(),
        }
    }
}

impl ModelConfig {
    /// Load the model configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse the model configuration from a JSON string.
    pub fn from_json(json: &str) -> ValidationResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }
}

/// Train/test/validate partition fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitFractions {
    pub train: f64,
    pub test: f64,
    pub validate: f64,
}

impl Default for SplitFractions {
    fn default() -> Self {
        SplitFractions {
            train: 0.5,
            test: 0.2,
            validate: 0.3,
        }
    }
}

impl SplitFractions {
    pub fn sum(&self) -> f64 {
        self.train + self.test + self.validate
    }

    /// Reject negative fractions and fractions that do not sum to 1.0.
    pub fn validate(&self) -> ValidationResult<()> {
        for (field, value) in [
            ("split.train", self.train),
            ("split.test", self.test),
            ("split.validate", self.validate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: field.to_string(),
                    message: format!("must be a non-negative fraction, got {}", value),
                });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > SPLIT_SUM_TOLERANCE {
            return Err(ValidationError::InvalidSplit {
                train: self.train,
                test: self.test,
                validate: self.validate,
                sum,
            });
        }
        Ok(())
    }
}
