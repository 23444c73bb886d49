//! Fuzz target for model.json configuration parsing.
//!
//! Tests that JSON model configuration parsing and validation handle
//! arbitrary input without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tt_config::validate::validate_model_config;
use tt_config::ModelConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = ModelConfig::from_json(text) {
        let _ = validate_model_config(&config);
    }
});
