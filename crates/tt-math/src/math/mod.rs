//! Core math modules.

pub mod bessel;
pub mod circular;
pub mod guard;
pub mod stable;
