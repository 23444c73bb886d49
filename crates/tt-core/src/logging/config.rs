//! Logging configuration.
//!
//! Precedence, lowest first: defaults, `RUST_LOG`, `TT_LOG`, CLI flags.
//! `TT_LOG_FORMAT` and `TT_LOG_TIMESTAMPS` tune the output shape.

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Console lines for people.
    #[default]
    Human,
    /// One JSON object per line.
    Jsonl,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            _ => Err(format!("unknown log format: {s}")),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum severity that reaches the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Most verbose first, so a substring scan picks the loudest directive.
    const BY_VERBOSITY: [LogLevel; 5] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    /// Coarse level implied by a `RUST_LOG` directive string.
    ///
    /// `tt_core=debug,hyper=warn` yields `Debug`. Strings naming no level yield
    /// `None`.
    pub fn from_directives(directives: &str) -> Option<LogLevel> {
        let lowered = directives.to_ascii_lowercase();
        Self::BY_VERBOSITY
            .into_iter()
            .find(|level| lowered.contains(level.as_str()))
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_ascii_lowercase();
        match lowered.as_str() {
            "warning" => return Ok(LogLevel::Warn),
            "none" | "quiet" => return Ok(LogLevel::Off),
            _ => {}
        }
        Self::BY_VERBOSITY
            .into_iter()
            .chain([LogLevel::Off])
            .find(|level| level.as_str() == lowered)
            .ok_or_else(|| format!("unknown log level: {s}"))
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

/// Resolved logging settings for one process.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Prefix human lines with a timestamp.
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Info,
            timestamps: true,
        }
    }
}

impl LogConfig {
    /// Resolve settings from the process environment and CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), cli_level, cli_format)
    }

    /// Resolve settings through `lookup` instead of the real environment.
    ///
    /// Unparseable values are ignored and leave the lower layer in place.
    pub fn from_lookup<F>(
        lookup: F,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_level = match lookup("TT_LOG") {
            Some(raw) => raw.parse().ok(),
            None => lookup("RUST_LOG").and_then(|raw| LogLevel::from_directives(&raw)),
        };
        let env_format = lookup("TT_LOG_FORMAT").and_then(|raw| raw.parse().ok());
        let env_timestamps = lookup("TT_LOG_TIMESTAMPS").and_then(|raw| parse_switch(&raw));

        let mut config = LogConfig::default();
        if let Some(level) = cli_level.or(env_level) {
            config = config.with_level(level);
        }
        if let Some(format) = cli_format.or(env_format) {
            config = config.with_format(format);
        }
        if let Some(enabled) = env_timestamps {
            config = config.with_timestamps(enabled);
        }
        config
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
