//! Command-line parsing for the lab fitting tool.
//!
//! Argument parsing stays separate from the experiments: the parsed flags are
//! turned into a [`RunConfig`] and nothing below this module sees clap types.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{ExperimentSpec, RunConfig};
use crate::fit::DEFAULT_MAX_ITERATIONS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "labfit",
    version,
    about = "Fit and plot physics lab measurements (copper resistance, photoelectric effect, NMR)"
)]
pub struct Cli {
    /// Experiment to run.
    #[arg(value_enum, default_value_t = ExperimentSpec::All)]
    pub experiment: ExperimentSpec,

    /// Directory the chart images are written to.
    #[arg(short = 'o', long, env = "LABFIT_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Do not print a terminal preview of each chart.
    #[arg(long)]
    pub no_display: bool,

    /// Iteration budget of the nonlinear solver.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub max_iterations: usize,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(100..=8000))]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 600, value_parser = clap::value_parser!(u32).range(100..=8000))]
    pub height: u32,

    /// Export fits and derived values of the run to JSON.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            experiments: self.experiment,
            out_dir: self.out_dir.clone(),
            display: !self.no_display,
            max_iterations: self.max_iterations,
            width: self.width,
            height: self.height,
            export: self.export.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_run_everything_with_display() {
        let cli = Cli::try_parse_from(["labfit", "--out-dir", "charts"]).unwrap();
        let cfg = cli.run_config();
        assert_eq!(cfg.experiments, ExperimentSpec::All);
        assert_eq!(cfg.out_dir, PathBuf::from("charts"));
        assert!(cfg.display);
        assert_eq!(cfg.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert!(cfg.export.is_none());
    }

    #[test]
    fn experiment_and_flags() {
        let cli = Cli::try_parse_from([
            "labfit",
            "nmr",
            "--out-dir",
            "x",
            "--no-display",
            "--max-iterations",
            "50",
            "--export",
            "r.json",
            "-v",
        ])
        .unwrap();
        let cfg = cli.run_config();
        assert_eq!(cfg.experiments, ExperimentSpec::Nmr);
        assert!(!cfg.display);
        assert_eq!(cfg.max_iterations, 50);
        assert_eq!(cfg.export, Some(PathBuf::from("r.json")));
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_unknown_experiment_and_tiny_charts() {
        assert!(Cli::try_parse_from(["labfit", "optics"]).is_err());
        assert!(Cli::try_parse_from(["labfit", "--width", "10"]).is_err());
    }
}
