//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::model::ModelConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Split fractions must sum to 1.0, got {sum} (train={train}, test={test}, validate={validate})")]
    InvalidSplit {
        train: f64,
        test: f64,
        validate: f64,
        sum: f64,
    },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::InvalidSplit { .. } => 11,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

impl From<ValidationError> for tt_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidSplit {
                train,
                test,
                validate,
                sum,
            } => tt_common::Error::InvalidSplit {
                train,
                test,
                validate,
                sum,
            },
            ValidationError::IoError(msg) => tt_common::Error::Config(msg),
            other => tt_common::Error::Validation(other.to_string()),
        }
    }
}

/// Validate a model configuration semantically.
pub fn validate_model_config(config: &ModelConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    if config.day_span == 0 {
        return Err(ValidationError::InvalidValue {
            field: "day_span".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    if config.report_every == 0 {
        return Err(ValidationError::InvalidValue {
            field: "report_every".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    config.split.validate()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SplitFractions;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_model_config(&ModelConfig::default()).is_ok());
    }

    #[test]
    fn test_version_mismatch() {
        let config = ModelConfig {
            schema_version: "0.9.0".to_string(),
            ..ModelConfig::default()
        };
        let err = validate_model_config(&config).unwrap_err();
        assert!(matches!(err, ValidationError::VersionMismatch { .. }));
        assert_eq!(err.code(), 66);
    }

    #[test]
    fn test_zero_day_span_rejected() {
        let config = ModelConfig {
            day_span: 0,
            ..ModelConfig::default()
        };
        match validate_model_config(&config) {
            Err(ValidationError::InvalidValue { field, .. }) => assert_eq!(field, "day_span"),
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_report_every_rejected() {
        let config = ModelConfig {
            report_every: 0,
            ..ModelConfig::default()
        };
        assert!(validate_model_config(&config).is_err());
    }

    #[test]
    fn test_bad_split_maps_to_common_error() {
        let config = ModelConfig {
            split: SplitFractions {
                train: 0.7,
                test: 0.2,
                validate: 0.3,
            },
            ..ModelConfig::default()
        };
        let err: tt_common::Error = validate_model_config(&config).unwrap_err().into();
        assert!(matches!(err, tt_common::Error::InvalidSplit { .. }));
    }

    #[test]
    fn test_zero_samples_is_allowed() {
        let config = ModelConfig {
            samples: 0,
            ..ModelConfig::default()
        };
        assert!(validate_model_config(&config).is_ok());
    }
}
