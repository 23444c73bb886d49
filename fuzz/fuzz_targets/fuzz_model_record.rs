//! Fuzz target for model.csv parsing and bundle regrouping.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tt_core::dataset::read_model;
use tt_core::learn::summarize_scored;

fuzz_target!(|data: &[u8]| {
    if let Ok(scored) = read_model(data) {
        let summaries = summarize_scored(&scored);
        assert!(summaries.len() <= scored.len());
    }
});
