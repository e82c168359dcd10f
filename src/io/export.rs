//! Export a run's results to JSON.
//!
//! The export is the portable record of a run:
//! - fit parameters and quality per experiment
//! - derived physical values with units
//! - chart files written
//! - generation timestamp and solver settings

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ExperimentReport, RunConfig};
use crate::error::AppError;

/// Top-level JSON document.
#[derive(Debug, Serialize)]
pub struct ResultsFile<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Utc>,
    pub out_dir: &'a Path,
    pub max_iterations: usize,
    pub experiments: &'a [ExperimentReport],
}

/// Write the results of every experiment run to `path`, overwriting it.
pub fn write_results_json(path: &Path, reports: &[ExperimentReport], config: &RunConfig) -> Result<PathBuf, AppError> {
    let doc = ResultsFile {
        tool: "labfit",
        generated_at: Utc::now(),
        out_dir: &config.out_dir,
        max_iterations: config.max_iterations,
        experiments: reports,
    };

    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create results JSON '{}': {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write results JSON: {e}")))?;
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write results JSON: {e}")))?;

    tracing::info!(path = %path.display(), experiments = reports.len(), "exported results");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DerivedValue, ExperimentKind, FitQuality, FitRecord, ProportionalFit};

    #[test]
    fn export_contains_fits_and_derived_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let mut report = ExperimentReport::new(ExperimentKind::Nmr);
        report.fits.push(FitRecord::Proportional {
            name: "1H ν vs B0".into(),
            fit: ProportionalFit {
                slope: 0.042376,
                quality: FitQuality {
                    sse: 0.001,
                    rmse: 0.01,
                    r_squared: 0.999,
                    n: 6,
                },
            },
        });
        report.derived.push(DerivedValue::new("g_1H", 5.5598, ""));
        report.console.push("not exported".into());

        write_results_json(&path, &[report], &RunConfig::default()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["tool"], "labfit");
        assert!(json["generated_at"].is_string());

        let exp = &json["experiments"][0];
        assert_eq!(exp["kind"], "nmr");
        assert_eq!(exp["fits"][0]["model"], "proportional");
        assert_eq!(exp["fits"][0]["slope"], 0.042376);
        assert_eq!(exp["fits"][0]["quality"]["n"], 6);
        assert_eq!(exp["derived"][0]["name"], "g_1H");
        assert!(exp.get("console").is_none());
    }

    #[test]
    fn unwritable_path_maps_to_io_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("results.json");
        let err = write_results_json(&path, &[], &RunConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
