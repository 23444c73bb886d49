//! Entry builders and CSV fixtures.

#![allow(dead_code)]
// Each test binary uses a different subset of these helpers.

use chrono::Duration;
use tt_common::{parse_timestamp, Entry, Label};

/// One-hour entry starting at `start`.
pub fn entry(start: &str, modified: Label) -> Entry {
    let start = parse_timestamp(start).expect("valid fixture timestamp");
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

/// Entry with explicit categorical values on 2018-03-01 09:00Z.
pub fn entry_with(project: &str, description: &str, tags: &str, modified: Label) -> Entry {
    Entry {
        project: project.into(),
        description: description.into(),
        tags: tags.into(),
        ..entry("2018-03-01T09:00:00Z", modified)
    }
}

/// Reverse an oldest-first list into the most-recent-first input order.
pub fn newest_first(mut entries: Vec<Entry>) -> Vec<Entry> {
    entries.reverse();
    entries
}

/// Two weeks of alternating work, oldest first.
///
/// Admin entries late in the day are the modified ones, so the model has
/// something to learn.
pub fn fortnight() -> Vec<Entry> {
    let mut out = Vec::new();
    for day in 1..=14u32 {
        for (hour, project, modified) in [
            (9, "Research", false),
            (13, "Teaching", false),
            (18, "Admin", true),
        ] {
            let ts = format!("2018-03-{:02}T{:02}:00:00Z", day, hour);
            out.push(Entry {
                project: project.into(),
                description: format!("{} work", project),
                tags: if modified { "late".into() } else { String::new() },
                ..entry(&ts, Label::from_bool(modified))
            });
        }
    }
    out
}

/// CSV rendering of [`fortnight`] in the input layout, most recent first.
pub fn fortnight_csv() -> String {
    let mut csv = String::from("project,description,tags,start,end,updated,duration,modified\n");
    for e in newest_first(fortnight()) {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{}\n",
            e.project,
            e.description,
            e.tags,
            e.start.to_rfc3339(),
            e.end.to_rfc3339(),
            e.updated,
            e.duration_ms,
            e.modified
        ));
    }
    csv
}
