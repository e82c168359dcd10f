//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - measurement samples (`Sample`)
//! - fit outputs (`LinearFit`, `ProportionalFit`, `ResistanceFit`, `FitQuality`)
//! - per-experiment results (`FitRecord`, `DerivedValue`, `ExperimentReport`)
//! - run configuration (`RunConfig`, `ExperimentSpec`)

pub mod types;

pub use types::*;
