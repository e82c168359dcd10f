//! `lab-fits` library crate.
//!
//! The binary (`labfit`) is a thin wrapper around this library so that:
//!
//! - every experiment is testable without spawning processes
//! - fitting, physics and plotting stay reusable on their own

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod experiments;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod physics;
pub mod plot;
pub mod report;
