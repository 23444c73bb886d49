//! Entry builders shared by unit tests.

use chrono::Duration;
use tt_common::{parse_timestamp, Entry, Label};

/// Entry starting at `start` and lasting one hour, with fixed categorical values.
pub fn entry_at(start: &str, modified: Label) -> Entry {
    let start = parse_timestamp(start).expect("valid test timestamp");
    Entry {
        project: "Research".into(),
        description: "Reading".into(),
        tags: String::new(),
        start,
        end: start + Duration::hours(1),
        updated: start.to_rfc3339(),
        duration_ms: 3_600_000,
        modified,
    }
}

/// Entry on 2018-03-01 09:00Z with the given categorical values.
pub fn entry_with(project: &str, description: &str, tags: &str, modified: Label) -> Entry {
    Entry {
        project: project.into(),
        description: description.into(),
        tags: tags.into(),
        ..entry_at("2018-03-01T09:00:00Z", modified)
    }
}
