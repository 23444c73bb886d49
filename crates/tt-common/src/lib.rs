//! Time Triage common types, IDs, and errors.
//!
//! This crate provides foundational types shared across tt-core modules:
//! - Time entry records and the classification label
//! - Run and bundle identifiers
//! - Common error types
//! - Output format specifications

pub mod entry;
pub mod error;
pub mod id;
pub mod output;

pub use entry::{parse_timestamp, CategoricalFeature, Entry, Label, TimeField};
pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError, SuggestedAction};
pub use id::{BundleId, RunId};
pub use output::OutputFormat;

/// Schema version stamped on JSON command payloads.
pub const SCHEMA_VERSION: &str = "1.0.0";
