//! Curve fitting.
//!
//! Responsibilities:
//!
//! - closed-form ordinary least squares (`linear`): `y = a x + b` and `y = k x`
//! - iterative nonlinear least squares (`nonlinear`): Levenberg–Marquardt for
//!   any [`ParametricModel`](crate::models::ParametricModel)
//!
//! Every fitter is deterministic: the same samples always give the same
//! parameters.

use thiserror::Error;

pub mod linear;
pub mod nonlinear;

pub use linear::*;
pub use nonlinear::*;

/// Iteration budget of the nonlinear solver when none is configured.
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

/// Errors raised by the fitters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// The fit is mathematically undetermined (too few samples, all x equal, ...).
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// The iterative solver exhausted its iteration budget.
    #[error("Solver did not converge within {iterations} iterations")]
    Convergence { iterations: usize },

    /// NaN/inf in the input or in an intermediate result.
    #[error("Non-finite value: {0}")]
    NonFinite(String),
}

/// Reject samples containing NaN or infinities.
pub(crate) fn ensure_finite(samples: &[crate::domain::Sample]) -> Result<(), FitError> {
    match samples
        .iter()
        .position(|s| !(s.x.is_finite() && s.y.is_finite()))
    {
        Some(idx) => Err(FitError::NonFinite(format!("sample #{idx} is not finite"))),
        None => Ok(()),
    }
}
