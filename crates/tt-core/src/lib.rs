//! Time Triage Core Library
//!
//! This library provides the core functionality for time triage:
//! - Online feature posteriors and their fusion into a probability
//! - Streaming error/entropy evaluation and confusion scores
//! - Calendar-day bundling and parallel per-bundle learning
//! - Bootstrap resampling of bundle statistics
//! - Tabular I/O, splitting, and analysis
//! - Structured logging and exit codes
//!
//! The binary entry point is in `main.rs`.

pub mod analyse;
pub mod bundler;
pub mod dataset;
pub mod evaluate;
pub mod exit_codes;
pub mod inference;
pub mod learn;
pub mod logging;
pub mod resample;

#[cfg(test)]
mod test_support;
