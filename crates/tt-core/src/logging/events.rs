//! Structured event definitions for logging.
//!
//! Events follow a consistent schema for machine-parseable JSONL output.
//! All events carry the run id and the pipeline stage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Log levels for events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// Processing stages in the learning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup and configuration.
    Init,
    /// Reading entry tables.
    Load,
    /// Train/test/validate partitioning.
    Split,
    /// Online posterior updates per bundle.
    Learn,
    /// Running error and entropy tracking.
    Evaluate,
    /// Bootstrap resampling over bundles.
    Resample,
    /// Writing output tables.
    Export,
    /// Confusion and progression summaries.
    Analyse,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Init => "init",
            Stage::Load => "load",
            Stage::Split => "split",
            Stage::Learn => "learn",
            Stage::Evaluate => "evaluate",
            Stage::Resample => "resample",
            Stage::Export => "export",
            Stage::Analyse => "analyse",
        };
        write!(f, "{}", s)
    }
}

/// Standard event names used in logging.
pub mod event_names {
    // Run lifecycle
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";
    pub const RUN_FAILED: &str = "run.failed";

    // Load stage
    pub const LOAD_FINISHED: &str = "load.finished";

    // Split stage
    pub const SPLIT_FINISHED: &str = "split.finished";

    // Learn stage
    pub const LEARN_STARTED: &str = "learn.started";
    pub const LEARN_KAPPA: &str = "learn.kappa";
    pub const LEARN_PROGRESS: &str = "learn.progress";
    pub const LEARN_GUARD_CLAMPED: &str = "learn.guard_clamped";
    pub const LEARN_BUNDLE_DONE: &str = "learn.bundle_done";
    pub const LEARN_FINISHED: &str = "learn.finished";

    // Resample stage
    pub const RESAMPLE_EXCLUDED: &str = "resample.excluded";
    pub const RESAMPLE_FINISHED: &str = "resample.finished";

    // Analyse stage
    pub const ANALYSE_FINISHED: &str = "analyse.finished";

    // Export stage
    pub const EXPORT_WRITTEN: &str = "export.written";

    // Config/init events
    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";
    pub const CONFIG_ERROR: &str = "config.error";

    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// A structured log event for JSONL output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub ts: DateTime<Utc>,
    pub level: Level,
    /// Event name (e.g., "run.started", "learn.bundle_done").
    pub event: String,
    pub run_id: String,
    /// Short hash of the model config in effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,
    pub stage: Stage,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, serde_json::Value>,
}

impl LogEvent {
    pub fn new(
        level: Level,
        event: impl Into<String>,
        run_id: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
    ) -> Self {
        LogEvent {
            ts: Utc::now(),
            level,
            event: event.into(),
            run_id: run_id.into(),
            config_id: None,
            stage,
            message: message.into(),
            fields: HashMap::new(),
        }
    }

    /// Add a field to the event.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.fields.insert(key.into(), v);
        }
        self
    }

    /// Serialize to a single JSON line.
    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"error":"serialization_failed","event":"{}"}}"#,
                self.event
            )
        })
    }
}

/// Context for generating log events with a consistent run id.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub run_id: String,
    pub config_id: Option<String>,
}

impl LogContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
            config_id: None,
        }
    }

    pub fn with_config_id(mut self, config_id: impl Into<String>) -> Self {
        self.config_id = Some(config_id.into());
        self
    }

    /// Create an event with this context.
    pub fn event(
        &self,
        level: Level,
        event: impl Into<String>,
        stage: Stage,
        message: impl Into<String>,
    ) -> LogEvent {
        let mut e = LogEvent::new(level, event, &self.run_id, stage, message);
        e.config_id.clone_from(&self.config_id);
        e
    }

    pub fn info(&self, event: impl Into<String>, stage: Stage, message: impl Into<String>) -> LogEvent {
        self.event(Level::Info, event, stage, message)
    }
}
