//! The run loop shared by the binary and the integration tests.
//!
//! out dir -> experiment 1 -> experiment 2 -> ... -> optional JSON export
//!
//! The first failing experiment aborts the run; reports of the experiments
//! that already finished have been handed to `on_report` by then.

use crate::domain::{ExperimentReport, RunConfig};
use crate::error::AppError;

/// Run every experiment selected by `config`, in order.
pub fn run_experiments(
    config: &RunConfig,
    mut on_report: impl FnMut(&ExperimentReport),
) -> Result<Vec<ExperimentReport>, AppError> {
    std::fs::create_dir_all(&config.out_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output directory '{}': {e}", config.out_dir.display()),
        )
    })?;

    let mut reports = Vec::new();
    for kind in config.experiments.kinds() {
        let report = crate::experiments::run(kind, config)?;
        on_report(&report);
        reports.push(report);
    }

    if let Some(path) = &config.export {
        crate::io::write_results_json(path, &reports, config)?;
    }

    Ok(reports)
}
