//! Copper resistance against temperature (AC/DC bridge lab).
//!
//! Fits `R(t) = R₀(1 + α·t)` with the nonlinear solver. The starting point
//! comes from the closed-form line `R = a·t + b` (`R₀ = b`, `α = a/b`); when
//! that line is unusable the solver starts from all ones.

use crate::domain::{
    DerivedValue, ExperimentKind, ExperimentReport, FitRecord, ResistanceFit, RunConfig, Sample, zip_samples,
};
use crate::error::AppError;
use crate::experiments::{emit, evaluate, points};
use crate::fit::{FitError, SolverOptions, fit_linear, fit_nonlinear};
use crate::models::ResistanceModel;
use crate::plot::{BLUE, Chart, RED, Series, SeriesStyle};

pub const FILE_NAME: &str = "铜电阻温度特性曲线.png";

/// Bath temperature (°C).
pub const TEMPERATURES_C: [f64; 10] = [28.1, 31.1, 34.1, 37.1, 40.1, 43.1, 46.1, 49.1, 52.1, 55.1];

/// Bridge-balanced resistance R_x (Ω).
pub const RESISTANCES_OHM: [f64; 10] = [56.18, 56.66, 57.3, 57.94, 58.58, 59.22, 59.86, 60.51, 61.15, 61.79];

/// Where the fit equation is placed on the chart (data coordinates).
const EQUATION_AT: (f64, f64) = (30.0, 60.5);

pub fn samples() -> Vec<Sample> {
    zip_samples(&TEMPERATURES_C, &RESISTANCES_OHM)
}

/// Starting point `[R₀, α]` for the solver.
pub fn initial_guess(samples: &[Sample]) -> [f64; 2] {
    match fit_linear(samples) {
        Ok(line) if line.intercept != 0.0 && (line.slope / line.intercept).is_finite() => {
            [line.intercept, line.slope / line.intercept]
        }
        Ok(_) | Err(_) => [1.0, 1.0],
    }
}

/// Fit the resistance model within `max_iterations` solver iterations.
pub fn fit(samples: &[Sample], max_iterations: usize) -> Result<ResistanceFit, FitError> {
    let opts = SolverOptions {
        max_iterations,
        ..SolverOptions::default()
    };
    let initial = initial_guess(samples);
    let nl = fit_nonlinear(&ResistanceModel, samples, &initial, &opts)?;
    Ok(ResistanceFit {
        r0: nl.params[0],
        alpha: nl.params[1],
        iterations: nl.iterations,
        quality: nl.quality,
    })
}

pub fn equation(fit: &ResistanceFit) -> String {
    format!("R_x(t) = {:.4}(1 + {:.4}t)", fit.r0, fit.alpha)
}

pub fn chart(fit: &ResistanceFit) -> Chart {
    Chart::new("铜电阻温度特性曲线", "t (°C)", "R_x (Ω)", FILE_NAME)
        .with_series(Series::new(
            "原始数据",
            points(&TEMPERATURES_C, &RESISTANCES_OHM),
            BLUE,
            SeriesStyle::Points,
        ))
        .with_series(Series::new(
            "拟合曲线",
            evaluate(&TEMPERATURES_C, |t| fit.predict(t)),
            RED,
            SeriesStyle::Line,
        ))
        .with_annotation(equation(fit), EQUATION_AT)
}

pub fn run(config: &RunConfig) -> Result<ExperimentReport, AppError> {
    let mut report = ExperimentReport::new(ExperimentKind::Resistance);

    let fit = fit(&samples(), config.max_iterations)?;
    tracing::info!(
        r0 = fit.r0,
        alpha = fit.alpha,
        iterations = fit.iterations,
        rmse = fit.quality.rmse,
        "resistance fit"
    );

    emit(&chart(&fit), config, &mut report)?;

    report.console.push(format!(
        "Copper: R0 = {:.4} Ω, α = {:.6} /°C ({})",
        fit.r0,
        fit.alpha,
        equation(&fit)
    ));
    report.derived.push(DerivedValue::new("R0", fit.r0, "Ω"));
    report.derived.push(DerivedValue::new("alpha", fit.alpha, "1/°C"));
    report.fits.push(FitRecord::Resistance {
        name: "R(t) = R0(1 + αt)".into(),
        fit,
    });
    Ok(report)
}
