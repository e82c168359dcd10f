//! Parametric models fitted by the nonlinear solver.
//!
//! Models are implemented as small, pure types so that fitting code can
//! stay generic.

pub mod model;

pub use model::*;
