use crate::domain::{DerivedValue, ExperimentReport, FitRecord, RunConfig};

/// `1H: γ/2π = 0.04238 MHz/mT, g = 5.5598, Error = 0.4638%`
pub fn format_nmr_line(label: &str, gamma_over_2pi: f64, g: f64, error: Option<f64>) -> String {
    format!(
        "{label}: γ/2π = {gamma_over_2pi:.5} MHz/mT, g = {g:.4}, Error = {}",
        fmt_percent(error)
    )
}

/// `0.4638%`, or `n/a` when the percentage is undefined.
pub fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}%"),
        None => "n/a".to_string(),
    }
}

/// Format the full run summary: configuration, then per experiment the fit
/// diagnostics, derived values and written files.
pub fn format_run_summary(config: &RunConfig, reports: &[ExperimentReport]) -> String {
    let mut out = String::new();

    out.push_str("=== labfit - Physics Lab Fits ===\n");
    out.push_str(&format!("Output: {}\n", config.out_dir.display()));
    out.push_str(&format!(
        "Solver: max {} iterations | charts {}x{}px\n",
        config.max_iterations, config.width, config.height
    ));

    for report in reports {
        out.push_str(&format!("\n{}:\n", report.kind.display_name()));

        if !report.fits.is_empty() {
            out.push_str(&format_fit_table(&report.fits));
        }
        for d in &report.derived {
            out.push_str(&format!("- {}\n", format_derived(d)));
        }
        for path in &report.files {
            out.push_str(&format!("- wrote {}\n", path.display()));
        }
    }

    out
}

/// One row per fit: parameters and quality.
pub fn format_fit_table(fits: &[FitRecord]) -> String {
    let mut out = String::new();
    out.push_str(format!("{:<32} {:<36} {:>10} {:>10} {:>8}", "fit", "parameters", "SSE", "RMSE", "R²").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<32} {:-<36} {:->10} {:->10} {:->8}", "", "", "", "", "").trim_end());
    out.push('\n');

    for fit in fits {
        let q = fit.quality();
        out.push_str(
            format!(
                "{:<32} {:<36} {:>10} {:>10} {:>8.5}",
                truncate(fit.name(), 32),
                truncate(&fmt_params(fit), 36),
                fmt_num(q.sse),
                fmt_num(q.rmse),
                q.r_squared,
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn fmt_params(fit: &FitRecord) -> String {
    match fit {
        FitRecord::Linear { fit, .. } => format!("a={} b={}", fmt_num(fit.slope), fmt_num(fit.intercept)),
        FitRecord::Proportional { fit, .. } => format!("k={}", fmt_num(fit.slope)),
        FitRecord::Resistance { fit, .. } => {
            format!("R0={} α={} ({} it)", fmt_num(fit.r0), fmt_num(fit.alpha), fit.iterations)
        }
    }
}

fn format_derived(d: &DerivedValue) -> String {
    if d.unit.is_empty() {
        format!("{} = {}", d.name, fmt_num(d.value))
    } else {
        format!("{} = {} {}", d.name, fmt_num(d.value), d.unit)
    }
}

/// Six significant digits; scientific notation outside `[1e-3, 1e5)`.
fn fmt_num(v: f64) -> String {
    let a = v.abs();
    if a != 0.0 && !(1e-3..1e5).contains(&a) {
        format!("{v:.5e}")
    } else {
        format!("{v:.6}")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
