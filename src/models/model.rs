//! Parametric model evaluation.
//!
//! The nonlinear fitter relies on two primitive operations per model:
//! - predict `y(x)` given a parameter vector (for residuals/plots)
//! - fill the gradient `∂y/∂p` at `x` (one Jacobian row)
//!
//! Models are small value types so fitting code can stay generic.

/// A model `y = f(x; p)` with a fixed number of parameters.
pub trait ParametricModel {
    /// Number of parameters in `p`.
    fn param_len(&self) -> usize;

    /// Evaluate `f(x; p)`.
    fn predict(&self, x: f64, params: &[f64]) -> f64;

    /// Fill `out[j] = ∂f/∂p_j` at `x`.
    ///
    /// # Panics
    /// Panics if `out` or `params` are shorter than `param_len()`.
    fn fill_gradient(&self, x: f64, params: &[f64], out: &mut [f64]);

    /// Short label for logs.
    fn display_name(&self) -> &'static str;
}

/// `R(t) = R₀ (1 + α t)`, parameters `[R₀, α]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResistanceModel;

impl ParametricModel for ResistanceModel {
    fn param_len(&self) -> usize {
        2
    }

    fn predict(&self, t: f64, params: &[f64]) -> f64 {
        params[0] * (1.0 + params[1] * t)
    }

    fn fill_gradient(&self, t: f64, params: &[f64], out: &mut [f64]) {
        out[0] = 1.0 + params[1] * t;
        out[1] = params[0] * t;
    }

    fn display_name(&self) -> &'static str {
        "R0(1+alpha*t)"
    }
}

/// `y = a x + b`, parameters `[a, b]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineModel;

impl ParametricModel for LineModel {
    fn param_len(&self) -> usize {
        2
    }

    fn predict(&self, x: f64, params: &[f64]) -> f64 {
        params[0] * x + params[1]
    }

    fn fill_gradient(&self, x: f64, _params: &[f64], out: &mut [f64]) {
        out[0] = x;
        out[1] = 1.0;
    }

    fn display_name(&self) -> &'static str {
        "a*x+b"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resistance_model_at_zero_is_r0() {
        let p = [50.0, 0.004];
        assert_eq!(ResistanceModel.predict(0.0, &p), 50.0);
        assert!((ResistanceModel.predict(100.0, &p) - 70.0).abs() < 1e-12);
    }

    #[test]
    fn resistance_gradient_matches_finite_difference() {
        let p = [55.0, 0.0039];
        let t = 42.0;
        let mut g = [0.0; 2];
        ResistanceModel.fill_gradient(t, &p, &mut g);

        for j in 0..2 {
            let h = 1e-6 * p[j].abs().max(1e-3);
            let mut hi = p;
            let mut lo = p;
            hi[j] += h;
            lo[j] -= h;
            let fd = (ResistanceModel.predict(t, &hi) - ResistanceModel.predict(t, &lo)) / (2.0 * h);
            assert!((fd - g[j]).abs() < 1e-6 * g[j].abs().max(1.0), "param {j}: {fd} vs {}", g[j]);
        }
    }

    #[test]
    fn line_model_smoke() {
        let y = LineModel.predict(2.0, &[3.0, 1.0]);
        assert_eq!(y, 7.0);
    }
}
