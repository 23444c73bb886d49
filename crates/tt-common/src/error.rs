//! Error types for Time Triage.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Split Configuration
//!   Reason: split fractions must sum to 1.0 (train=0.5, test=0.2, validate=0.2, sum=0.9)
//!   Fix: Adjust the split fractions in model.json so they add up to exactly 1.0.
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 21,
//!   "category": "data",
//!   "message": "invalid record at row 12: unparseable duration 'abc'",
//!   "recoverable": true,
//!   "suggested_action": "fix_input",
//!   "context": { "row": 12 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for Time Triage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration errors (model config, split fractions).
    Config,
    /// Input record and dataset errors.
    Data,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Data => write!(f, "data"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Suggested actions for agents to take in response to errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Retry the operation.
    Retry,
    /// Reset configuration to defaults.
    ResetConfig,
    /// Run validation/check command.
    RunCheck,
    /// Repair or re-export the input table.
    FixInput,
    /// Abort the operation.
    Abort,
    /// Manual intervention required.
    ManualIntervention,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::Retry => write!(f, "retry"),
            SuggestedAction::ResetConfig => write!(f, "reset_config"),
            SuggestedAction::RunCheck => write!(f, "run_check"),
            SuggestedAction::FixInput => write!(f, "fix_input"),
            SuggestedAction::Abort => write!(f, "abort"),
            SuggestedAction::ManualIntervention => write!(f, "manual_intervention"),
        }
    }
}

/// Unified error type for Time Triage.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error(
        "split fractions must sum to 1.0 (train={train}, test={test}, validate={validate}, sum={sum})"
    )]
    InvalidSplit {
        train: f64,
        test: f64,
        validate: f64,
        sum: f64,
    },

    #[error("config validation failed: {0}")]
    Validation(String),

    // Data errors (20-29)
    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    #[error("invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    #[error("invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Data errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidSplit { .. } => 11,
            Error::Validation(_) => 12,
            Error::EmptyDataset(_) => 20,
            Error::InvalidRecord { .. } => 21,
            Error::InvalidTimestamp { .. } => 22,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
            Error::Csv(_) => 62,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidSplit { .. } | Error::Validation(_) => {
                ErrorCategory::Config
            }

            Error::EmptyDataset(_) | Error::InvalidRecord { .. } | Error::InvalidTimestamp { .. } => {
                ErrorCategory::Data
            }

            Error::Io(_) | Error::Json(_) | Error::Csv(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether this error is potentially recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Config errors: recoverable by fixing/resetting config
            Error::Config(_) => true,
            Error::InvalidSplit { .. } => true,
            Error::Validation(_) => true,

            // Data: recoverable by repairing the input
            Error::EmptyDataset(_) => true,
            Error::InvalidRecord { .. } => true,
            Error::InvalidTimestamp { .. } => true,

            // I/O: often transient
            Error::Io(_) => true,
            Error::Json(_) => true,
            Error::Csv(_) => true,
        }
    }

    /// Returns the suggested action for agents.
    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Error::Config(_) => SuggestedAction::RunCheck,
            Error::InvalidSplit { .. } => SuggestedAction::ResetConfig,
            Error::Validation(_) => SuggestedAction::RunCheck,

            Error::EmptyDataset(_) => SuggestedAction::FixInput,
            Error::InvalidRecord { .. } => SuggestedAction::FixInput,
            Error::InvalidTimestamp { .. } => SuggestedAction::FixInput,

            Error::Io(_) => SuggestedAction::Retry,
            Error::Json(_) => SuggestedAction::ManualIntervention,
            Error::Csv(_) => SuggestedAction::FixInput,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Run 'tt-core check' to validate configuration, or check syntax in model.json."
            }
            Error::InvalidSplit { .. } => {
                "Adjust the split fractions in model.json so they add up to exactly 1.0."
            }
            Error::Validation(_) => {
                "Run 'tt-core check' to see which configuration value is out of range."
            }

            Error::EmptyDataset(_) => {
                "The input table has no entries. Re-export the data or point --data-dir at the right directory."
            }
            Error::InvalidRecord { .. } => {
                "Fix the offending row. Columns must be: project, description, tags, start, end, updated, duration, modified."
            }
            Error::InvalidTimestamp { .. } => {
                "Timestamps must be ISO-8601, e.g. 2018-03-01T09:15:00-05:00."
            }

            Error::Io(_) => "Check that the data directory exists and is writable. Retry the operation.",
            Error::Json(_) => {
                "Invalid JSON in file. Check syntax with 'cat <file> | jq .' or restore from backup."
            }
            Error::Csv(_) => "The table is not valid CSV. Check quoting and the header row.",
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidSplit { .. } => "Invalid Split Configuration",
            Error::Validation(_) => "Configuration Validation Failed",

            Error::EmptyDataset(_) => "Empty Dataset",
            Error::InvalidRecord { .. } => "Invalid Record",
            Error::InvalidTimestamp { .. } => "Invalid Timestamp",

            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
            Error::Csv(_) => "CSV Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Suggested action for agents.
    pub suggested_action: SuggestedAction,

    /// Additional structured context (e.g., row number).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::InvalidSplit {
                train,
                test,
                validate,
                sum,
            } => {
                context.insert("train".to_string(), serde_json::json!(train));
                context.insert("test".to_string(), serde_json::json!(test));
                context.insert("validate".to_string(), serde_json::json!(validate));
                context.insert("sum".to_string(), serde_json::json!(sum));
            }
            Error::InvalidRecord { row, .. } => {
                context.insert("row".to_string(), serde_json::json!(row));
            }
            Error::InvalidTimestamp { value } => {
                context.insert("value".to_string(), serde_json::json!(value));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_error() -> Error {
        Error::InvalidSplit {
            train: 0.5,
            test: 0.2,
            validate: 0.2,
            sum: 0.9,
        }
    }

    #[test]
    fn test_error_code() {
        assert_eq!(Error::Config("test".into()).code(), 10);
        assert_eq!(split_error().code(), 11);
        assert_eq!(
            Error::InvalidRecord {
                row: 3,
                message: "bad".into()
            }
            .code(),
            21
        );
        assert_eq!(Error::EmptyDataset("train.csv".into()).code(), 20);
    }

    #[test]
    fn test_error_category() {
        assert_eq!(split_error().category(), ErrorCategory::Config);
        assert_eq!(
            Error::InvalidTimestamp { value: "x".into() }.category(),
            ErrorCategory::Data
        );
        assert_eq!(
            Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")).category(),
            ErrorCategory::Io
        );
    }

    #[test]
    fn test_split_message_mentions_sum() {
        let msg = split_error().to_string();
        assert!(msg.contains("sum=0.9"), "{msg}");
    }

    #[test]
    fn test_structured_error_context() {
        let err = Error::InvalidRecord {
            row: 12,
            message: "unparseable duration 'abc'".into(),
        };
        let structured = StructuredError::from(&err);
        assert_eq!(structured.code, 21);
        assert_eq!(structured.category, ErrorCategory::Data);
        assert_eq!(structured.suggested_action, SuggestedAction::FixInput);
        assert_eq!(structured.context.get("row"), Some(&serde_json::json!(12)));

        let json = structured.to_json();
        assert!(json.contains("\"fix_input\""));
    }

    #[test]
    fn test_format_error_human_without_color() {
        let out = format_error_human(&split_error(), false);
        assert!(out.starts_with("✗ Invalid Split Configuration"));
        assert!(out.contains("Fix: Adjust the split fractions"));
        assert!(!out.contains("\x1b["));
    }

    #[test]
    fn test_data_errors_point_at_the_input() {
        let err = Error::InvalidTimestamp {
            value: "yesterday".into(),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.suggested_action(), SuggestedAction::FixInput);
        assert!(err.remediation().contains("ISO-8601"));
    }
}
