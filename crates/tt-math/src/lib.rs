//! Time Triage math utilities.

pub mod math;

pub use math::bessel::*;
pub use math::circular::*;
pub use math::guard::*;
pub use math::stable::*;
