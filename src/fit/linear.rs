//! Closed-form ordinary least squares.
//!
//! The slope/intercept problem is solved on a centered and scaled abscissa
//! `u = (x - mean) / spread`. Lab tables put frequencies around `1e14` Hz next
//! to an intercept column of ones; without the rescaling the design matrix
//! has a condition number near `1e15` and the intercept loses most digits.

use nalgebra::{DMatrix, DVector};

use crate::domain::{LinearFit, ProportionalFit, Sample};
use crate::fit::{FitError, ensure_finite};
use crate::math::{fit_quality, solve_least_squares};

/// Fit `y = slope·x + intercept` (polynomial fit of degree 1).
///
/// Fails with [`FitError::DegenerateInput`] for fewer than two samples or when
/// every `x` is identical.
pub fn fit_linear(samples: &[Sample]) -> Result<LinearFit, FitError> {
    ensure_finite(samples)?;
    let n = samples.len();
    if n < 2 {
        return Err(FitError::DegenerateInput(format!(
            "linear fit needs at least 2 samples, got {n}"
        )));
    }

    // Summing x / n keeps the mean finite for any finite abscissa.
    let mean_x: f64 = samples.iter().map(|s| s.x / n as f64).sum();
    let spread = samples
        .iter()
        .map(|s| (s.x - mean_x).abs())
        .fold(0.0_f64, f64::max);
    if !mean_x.is_finite() || !spread.is_finite() {
        return Err(FitError::NonFinite(
            "x values span more than the f64 range".to_string(),
        ));
    }
    if spread == 0.0 {
        return Err(FitError::DegenerateInput(
            "all x values are identical".to_string(),
        ));
    }

    let mut x = DMatrix::<f64>::zeros(n, 2);
    let mut y = DVector::<f64>::zeros(n);
    for (i, s) in samples.iter().enumerate() {
        x[(i, 0)] = (s.x - mean_x) / spread;
        x[(i, 1)] = 1.0;
        y[i] = s.y;
    }

    let beta = solve_least_squares(&x, &y)
        .ok_or_else(|| FitError::NonFinite("linear least squares has no stable solution".into()))?;

    let slope = beta[0] / spread;
    let intercept = beta[1] - slope * mean_x;
    let quality = fit_quality(samples, |x| slope * x + intercept);

    Ok(LinearFit {
        slope,
        intercept,
        quality,
    })
}

/// Fit `y = slope·x` (line through the origin): `slope = Σxy / Σx²`.
pub fn fit_proportional(samples: &[Sample]) -> Result<ProportionalFit, FitError> {
    ensure_finite(samples)?;
    if samples.is_empty() {
        return Err(FitError::DegenerateInput(
            "proportional fit needs at least 1 sample".to_string(),
        ));
    }

    let sxx: f64 = samples.iter().map(|s| s.x * s.x).sum();
    if sxx == 0.0 {
        return Err(FitError::DegenerateInput("all x values are zero".to_string()));
    }
    let sxy: f64 = samples.iter().map(|s| s.x * s.y).sum();
    let slope = sxy / sxx;
    if !slope.is_finite() {
        return Err(FitError::NonFinite("proportional slope overflowed".into()));
    }

    let quality = fit_quality(samples, |x| slope * x);
    Ok(ProportionalFit { slope, quality })
}
