//! Terminal reporting: fit diagnostics, derived values and the NMR result lines.
//!
//! Formatting lives in one place so the experiment code only produces numbers
//! and output changes stay localized.

pub mod format;

pub use format::*;
