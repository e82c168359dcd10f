//! Output helpers.
//!
//! - JSON results export (`export`)

pub mod export;

pub use export::*;
