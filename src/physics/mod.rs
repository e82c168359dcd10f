//! Physics layer: constants and quantities derived from fit parameters.

pub mod constants;
pub mod derived;
pub mod peaks;

pub use derived::*;
pub use peaks::*;
