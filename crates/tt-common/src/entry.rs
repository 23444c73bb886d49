//! Time entry records and the modification label.
//!
//! An [`Entry`] is the immutable input observation. Everything the model
//! computes about an entry lives elsewhere (see `tt_core::learn::ScoredEntry`).

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Milliseconds in one week; durations are modelled on a week-fraction scale.
pub const MS_PER_WEEK: f64 = 3_600_000.0 * 24.0 * 7.0;

/// Naive layouts accepted when a timestamp carries no offset.
const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Ground-truth label: was the entry edited by hand after it was recorded?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// Class 0.
    NotModified,
    /// Class 1.
    Modified,
}

impl Label {
    pub fn from_bool(modified: bool) -> Self {
        if modified {
            Label::Modified
        } else {
            Label::NotModified
        }
    }

    pub fn is_modified(self) -> bool {
        matches!(self, Label::Modified)
    }

    /// Class index used by the per-class posterior pairs.
    pub fn class_index(self) -> usize {
        match self {
            Label::NotModified => 0,
            Label::Modified => 1,
        }
    }

    /// Table spelling (`True` / `False`).
    pub fn as_str(self) -> &'static str {
        match self {
            Label::NotModified => "False",
            Label::Modified => "True",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(Label::Modified),
            "false" | "0" | "no" => Ok(Label::NotModified),
            _ => Err(format!("unknown label: {}", s)),
        }
    }
}

/// The categorical features, in the order they are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalFeature {
    Project,
    Description,
    Tags,
}

impl CategoricalFeature {
    pub const ALL: [CategoricalFeature; 3] = [
        CategoricalFeature::Project,
        CategoricalFeature::Description,
        CategoricalFeature::Tags,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CategoricalFeature::Project => "project",
            CategoricalFeature::Description => "description",
            CategoricalFeature::Tags => "tags",
        }
    }
}

impl fmt::Display for CategoricalFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The two cyclic time-of-day features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeField {
    Start,
    End,
}

impl TimeField {
    pub const ALL: [TimeField; 2] = [TimeField::Start, TimeField::End];

    pub fn name(self) -> &'static str {
        match self {
            TimeField::Start => "start",
            TimeField::End => "end",
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One time-tracking observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub project: String,
    pub description: String,
    pub tags: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// Last-updated timestamp, carried through verbatim.
    pub updated: String,
    /// Duration in milliseconds; running timers may report negative values.
    pub duration_ms: i64,
    pub modified: Label,
}

impl Entry {
    /// Value of a categorical feature.
    pub fn feature(&self, feature: CategoricalFeature) -> &str {
        match feature {
            CategoricalFeature::Project => &self.project,
            CategoricalFeature::Description => &self.description,
            CategoricalFeature::Tags => &self.tags,
        }
    }

    pub fn timestamp(&self, field: TimeField) -> &DateTime<FixedOffset> {
        match field {
            TimeField::Start => &self.start,
            TimeField::End => &self.end,
        }
    }

    /// Wall-clock hour (in the timestamp's own offset).
    pub fn hour(&self, field: TimeField) -> u32 {
        self.timestamp(field).hour()
    }

    /// Calendar day the entry started on.
    pub fn day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Day of month the entry started on.
    pub fn day_of_month(&self) -> u32 {
        self.start.day()
    }

    /// Duration expressed as a fraction of a week.
    pub fn duration_weeks(&self) -> f64 {
        self.duration_ms as f64 / MS_PER_WEEK
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Offsets are preserved. Timestamps without an offset are read as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%:z") {
        return Ok(dt);
    }
    for layout in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, layout) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(Error::InvalidTimestamp {
        value: value.to_string(),
    })
}
