//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the selected experiments
//! - prints result lines and the run summary

use clap::Parser;

use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `labfit` binary.
pub fn run() -> Result<(), AppError> {
    // Optional: LABFIT_OUT_DIR / LABFIT_FONT / RUST_LOG may come from `.env`.
    dotenvy::dotenv().ok();

    let cli = crate::cli::Cli::parse();
    crate::logging::init(cli.verbose);
    let config = cli.run_config();
    tracing::debug!(?config, "starting run");

    let reports = pipeline::run_experiments(&config, |report| {
        for line in &report.console {
            println!("{line}");
        }
    })?;

    println!();
    println!("{}", crate::report::format_run_summary(&config, &reports));
    Ok(())
}
