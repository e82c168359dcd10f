//! The three laboratory experiments.
//!
//! Each experiment owns its measurement tables and runs top to bottom:
//! fit, derive physical quantities, write charts, collect console lines.
//! Experiments share nothing but library code and the [`RunConfig`].

use crate::domain::{ExperimentKind, ExperimentReport, RunConfig};
use crate::error::AppError;
use crate::plot::{Chart, save_and_show};

pub mod nmr;
pub mod photoelectric;
pub mod resistance;

/// Run one experiment. Errors carry the experiment name as context.
pub fn run(kind: ExperimentKind, config: &RunConfig) -> Result<ExperimentReport, AppError> {
    tracing::info!(experiment = ?kind, "running {}", kind.display_name());
    let result = match kind {
        ExperimentKind::Resistance => resistance::run(config),
        ExperimentKind::Photoelectric => photoelectric::run(config),
        ExperimentKind::Nmr => nmr::run(config),
    };
    result.map_err(|e| e.context(kind.display_name()))
}

/// Write `chart` (and preview it) and record the file on `report`.
pub(crate) fn emit(chart: &Chart, config: &RunConfig, report: &mut ExperimentReport) -> Result<(), AppError> {
    let path = save_and_show(chart, &config.out_dir, (config.width, config.height), config.display)?;
    report.files.push(path);
    Ok(())
}

/// `(x, f(x))` for every x of the table, in table order.
pub(crate) fn evaluate(xs: &[f64], f: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
    xs.iter().map(|&x| (x, f(x))).collect()
}

pub(crate) fn points(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}
