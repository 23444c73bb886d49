//! Fuzz target for the online learning loop.
//!
//! Arbitrary entry streams, including negative durations and degenerate
//! hours, must learn without panicking and keep every probability inside
//! (0, 1).

#![no_main]

use arbitrary::Arbitrary;
use chrono::{Duration, TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use tt_common::{Entry, Label};
use tt_core::learn::{learn, LearnOptions};
use tt_core::logging::LogContext;

#[derive(Debug, Arbitrary)]
struct FuzzEntry {
    day: u8,
    hour: u8,
    minutes: i16,
    project: u8,
    tag: bool,
    modified: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    day_span: u8,
    entries: Vec<FuzzEntry>,
}

fuzz_target!(|input: FuzzInput| {
    let Some(base) = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).single() else {
        return;
    };
    let entries: Vec<Entry> = input
        .entries
        .iter()
        .map(|e| {
            let start = (base
                + Duration::days(i64::from(e.day))
                + Duration::hours(i64::from(e.hour % 24)))
            .fixed_offset();
            let duration_ms = i64::from(e.minutes) * 60_000;
            Entry {
                project: format!("p{}", e.project % 8),
                description: String::new(),
                tags: if e.tag { "t".into() } else { String::new() },
                start,
                end: start + Duration::milliseconds(duration_ms),
                updated: String::new(),
                duration_ms,
                modified: Label::from_bool(e.modified),
            }
        })
        .collect();

    let options = LearnOptions {
        day_span: u32::from(input.day_span),
        report_every: 50,
    };
    if let Ok(outcome) = learn(&entries, &options, &LogContext::new("tt-fuzz")) {
        for scored in outcome.scored() {
            assert!(scored.probability > 0.0 && scored.probability < 1.0);
        }
    }
});
