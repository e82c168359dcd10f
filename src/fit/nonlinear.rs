//! Levenberg–Marquardt nonlinear least squares.
//!
//! Given samples `(x_i, y_i)`, a model `f(x; p)` and a starting point `p₀`,
//! each iteration solves the damped normal equations
//!
//! ```text
//! (JᵀJ + λ·diag(JᵀJ)) δ = Jᵀ r,    r_i = y_i − f(x_i; p)
//! ```
//!
//! and accepts `p + δ` only when it lowers the residual sum of squares.
//! Accepted steps shrink `λ` (towards Gauss–Newton), rejected steps grow it
//! (towards scaled gradient descent). Scaling the damping by `diag(JᵀJ)` keeps
//! parameters of very different magnitude (R₀ ≈ 50 Ω, α ≈ 4e-3 /°C) on an
//! equal footing.

use nalgebra::{DMatrix, DVector};

use crate::domain::{FitQuality, Sample};
use crate::fit::{DEFAULT_MAX_ITERATIONS, FitError, ensure_finite};
use crate::math::fit_quality;
use crate::models::ParametricModel;

/// Damping applied to the very first step.
const INITIAL_LAMBDA: f64 = 1e-3;

/// Damping factor change on accepted/rejected steps.
const LAMBDA_FACTOR: f64 = 10.0;

/// Past this damping no step can lower the cost: the current point is a minimum
/// to machine precision.
const MAX_LAMBDA: f64 = 1e16;

/// Floor for zero diagonal entries of `JᵀJ` (a parameter with no influence).
const DIAG_FLOOR: f64 = 1e-30;

/// Solver settings.
#[derive(Debug, Clone)]
pub struct SolverOptions {
    /// Outer iterations (Jacobian evaluations) before giving up.
    pub max_iterations: usize,
    /// Relative reduction of the cost below which the fit is converged.
    pub ftol: f64,
    /// Relative step size below which the fit is converged.
    pub xtol: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            ftol: 1.5e-8,
            xtol: 1.5e-8,
        }
    }
}

/// Parameters of a converged nonlinear fit.
#[derive(Debug, Clone)]
pub struct NonlinearFit {
    pub params: Vec<f64>,
    pub iterations: usize,
    pub quality: FitQuality,
}

/// Fit `model` to `samples` starting from `initial`.
///
/// Returns [`FitError::Convergence`] when `opts.max_iterations` iterations do
/// not meet either tolerance; no fallback parameters are substituted.
pub fn fit_nonlinear<M: ParametricModel>(
    model: &M,
    samples: &[Sample],
    initial: &[f64],
    opts: &SolverOptions,
) -> Result<NonlinearFit, FitError> {
    ensure_finite(samples)?;
    let p = model.param_len();
    let n = samples.len();

    if initial.len() != p {
        return Err(FitError::DegenerateInput(format!(
            "{} takes {p} parameters, initial guess has {}",
            model.display_name(),
            initial.len()
        )));
    }
    if n < p {
        return Err(FitError::DegenerateInput(format!(
            "{} needs at least {p} samples, got {n}",
            model.display_name()
        )));
    }
    if initial.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite("initial guess is not finite".into()));
    }

    let mut params = DVector::from_column_slice(initial);
    let mut jac = DMatrix::<f64>::zeros(n, p);
    let mut res = DVector::<f64>::zeros(n);
    let mut grad_row = vec![0.0; p];
    let mut lambda = INITIAL_LAMBDA;

    let mut cost = residuals(model, samples, params.as_slice(), &mut res);
    if !cost.is_finite() {
        return Err(FitError::NonFinite("model is not finite at the initial guess".into()));
    }

    for iteration in 1..=opts.max_iterations {
        if cost == 0.0 {
            return Ok(finish(model, samples, params, iteration - 1));
        }

        for (i, s) in samples.iter().enumerate() {
            model.fill_gradient(s.x, params.as_slice(), &mut grad_row);
            for (j, g) in grad_row.iter().enumerate() {
                jac[(i, j)] = *g;
            }
        }
        let jt = jac.transpose();
        let normal = &jt * &jac;
        let rhs = &jt * &res;

        // Inner loop: raise the damping until a step lowers the cost.
        let mut trial_res = DVector::<f64>::zeros(n);
        let accepted = loop {
            if lambda > MAX_LAMBDA {
                break None;
            }

            let mut damped = normal.clone();
            for j in 0..p {
                damped[(j, j)] += lambda * normal[(j, j)].max(DIAG_FLOOR);
            }

            let Some(chol) = damped.cholesky() else {
                lambda *= LAMBDA_FACTOR;
                continue;
            };
            let step = chol.solve(&rhs);
            let trial = &params + &step;
            let trial_cost = residuals(model, samples, trial.as_slice(), &mut trial_res);

            if trial_cost.is_finite() && trial_cost < cost {
                lambda = (lambda / LAMBDA_FACTOR).max(f64::EPSILON);
                break Some((trial, step, trial_cost));
            }
            lambda *= LAMBDA_FACTOR;
        };

        let Some((trial, step, trial_cost)) = accepted else {
            tracing::debug!(
                model = model.display_name(),
                iteration,
                cost,
                "no descent step left; stopping at current point"
            );
            return Ok(finish(model, samples, params, iteration));
        };

        let cost_drop = cost - trial_cost;
        let step_small = step.norm() <= opts.xtol * (trial.norm() + opts.xtol);
        let cost_small = cost_drop <= opts.ftol * cost;

        params = trial;
        cost = trial_cost;
        std::mem::swap(&mut res, &mut trial_res);

        if step_small || cost_small {
            tracing::debug!(
                model = model.display_name(),
                iteration,
                cost,
                lambda,
                "converged"
            );
            return Ok(finish(model, samples, params, iteration));
        }
    }

    Err(FitError::Convergence {
        iterations: opts.max_iterations,
    })
}

/// Fill `out` with `y − f(x; p)` and return the sum of squares.
fn residuals<M: ParametricModel>(model: &M, samples: &[Sample], params: &[f64], out: &mut DVector<f64>) -> f64 {
    let mut sse = 0.0;
    for (i, s) in samples.iter().enumerate() {
        let r = s.y - model.predict(s.x, params);
        out[i] = r;
        sse += r * r;
    }
    sse
}

fn finish<M: ParametricModel>(model: &M, samples: &[Sample], params: DVector<f64>, iterations: usize) -> NonlinearFit {
    let params: Vec<f64> = params.iter().copied().collect();
    let quality = fit_quality(samples, |x| model.predict(x, &params));
    NonlinearFit {
        params,
        iterations,
        quality,
    }
}
