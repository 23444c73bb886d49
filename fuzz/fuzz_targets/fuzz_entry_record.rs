//! Fuzz target for input table parsing.
//!
//! Tests that reading an entry table handles arbitrary bytes without
//! panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tt_core::dataset::read_entries;

fuzz_target!(|data: &[u8]| {
    // Malformed rows must surface as errors, never panics
    let _ = read_entries(data);
});
