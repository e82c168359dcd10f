//! Least squares solver for small dense systems.
//!
//! Solves
//!
//! ```text
//! minimize ‖X β − y‖²
//! ```
//!
//! for the straight-line fit, whose design matrix is `[u, 1]` with `u` the
//! centered and scaled abscissa.
//!
//! SVD is used so tall (more rows than columns) systems are handled robustly.
//! Nalgebra's `QR::solve` is intended for square systems and panics on
//! non-square input.

use nalgebra::{DMatrix, DVector};

/// Singular values below this cutoff are treated as zero.
const SVD_EPS: f64 = 1e-12;

/// Solve a least squares problem using SVD.
///
/// The callers pass well-conditioned columns (the abscissa is already
/// centered and scaled to `[-1, 1]`), so one cutoff is enough. Returns `None`
/// for non-finite input or when the solution does not come out finite.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if !x.iter().chain(y.iter()).all(|v| v.is_finite()) {
        return None;
    }

    let beta = x.clone().svd(true, true).solve(y, SVD_EPS).ok()?;
    beta.iter().all(|v| v.is_finite()).then_some(beta)
}
