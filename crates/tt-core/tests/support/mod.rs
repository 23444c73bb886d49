//! Shared helpers for tt-core integration tests.

pub mod entries;
