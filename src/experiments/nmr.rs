//! Nuclear magnetic resonance of ¹H and ¹⁹F.
//!
//! The resonance condition `ν = (γ/2π)·B₀` is a line through the origin, so
//! γ/2π is the slope of a proportional fit of ν against B₀. It is quoted to 5
//! decimals (MHz/mT) and the g-factor is derived from the quoted value.

use crate::domain::{DerivedValue, ExperimentKind, ExperimentReport, FitRecord, ProportionalFit, RunConfig, zip_samples};
use crate::error::AppError;
use crate::experiments::{emit, evaluate, points};
use crate::fit::fit_proportional;
use crate::physics::constants::{G_FACTOR_1H, G_FACTOR_19F};
use crate::physics::{g_factor, gamma_from_slope, percent_error};
use crate::plot::{BLUE, Chart, RED, Series, SeriesStyle};
use crate::report::format_nmr_line;

/// Decimals γ/2π is quoted with.
const SLOPE_DECIMALS: i32 = 5;

/// RF frequency at resonance (MHz), shared by both nuclei.
pub const FREQUENCIES_MHZ: [f64; 6] = [10.00, 10.30, 10.60, 10.90, 11.20, 11.50];

/// One nucleus: measurement table plus reference g-factor.
#[derive(Debug, Clone, Copy)]
pub struct Nucleus {
    /// Console label, e.g. `1H`.
    pub label: &'static str,
    pub title: &'static str,
    pub file_name: &'static str,
    /// Resonance field per frequency (mT).
    pub fields_mt: [f64; 6],
    pub accepted_g: f64,
}

pub const HYDROGEN: Nucleus = Nucleus {
    label: "1H",
    title: "¹H NMR: ν vs B₀",
    file_name: "1H_nmr_plot.png",
    fields_mt: [236.8, 243.9, 249.4, 256.9, 264.4, 270.8],
    accepted_g: G_FACTOR_1H,
};

pub const FLUORINE: Nucleus = Nucleus {
    label: "19F",
    title: "¹⁹F NMR: ν vs B₀",
    file_name: "19F_nmr_plot.png",
    fields_mt: [250.1, 256.5, 266.6, 273.1, 280.2, 287.4],
    accepted_g: G_FACTOR_19F,
};

pub const NUCLEI: [Nucleus; 2] = [HYDROGEN, FLUORINE];

/// Result for one nucleus.
#[derive(Debug, Clone)]
pub struct NucleusResult {
    pub fit: ProportionalFit,
    /// γ/2π as quoted (MHz/mT).
    pub gamma_over_2pi: f64,
    /// γ (rad·s⁻¹·T⁻¹).
    pub gamma: f64,
    pub g: f64,
    /// Percent error of `g` against the accepted value.
    pub error: Option<f64>,
}

pub fn analyze(nucleus: &Nucleus) -> Result<NucleusResult, AppError> {
    let fit = fit_proportional(&zip_samples(&nucleus.fields_mt, &FREQUENCIES_MHZ))?;
    let gamma_over_2pi = round_to(fit.slope, SLOPE_DECIMALS);
    let gamma = gamma_from_slope(gamma_over_2pi);
    let g = g_factor(gamma);
    Ok(NucleusResult {
        error: percent_error(g, nucleus.accepted_g),
        fit,
        gamma_over_2pi,
        gamma,
        g,
    })
}

pub fn chart(nucleus: &Nucleus, result: &NucleusResult) -> Chart {
    let k = result.gamma_over_2pi;
    Chart::new(nucleus.title, "B₀ (mT)", "ν (MHz)", nucleus.file_name)
        .with_series(Series::new(
            "Experimental data",
            points(&nucleus.fields_mt, &FREQUENCIES_MHZ),
            BLUE,
            SeriesStyle::Points,
        ))
        .with_series(Series::new(
            format!("Fit: γ/2π = {k:.5} MHz/mT"),
            evaluate(&nucleus.fields_mt, |b| k * b),
            RED,
            SeriesStyle::Line,
        ))
}

pub fn run(config: &RunConfig) -> Result<ExperimentReport, AppError> {
    let mut report = ExperimentReport::new(ExperimentKind::Nmr);

    for nucleus in &NUCLEI {
        let result = analyze(nucleus)?;
        tracing::info!(
            nucleus = nucleus.label,
            slope = result.fit.slope,
            g = result.g,
            "proportional fit"
        );
        emit(&chart(nucleus, &result), config, &mut report)?;

        report.console.push(format_nmr_line(
            nucleus.label,
            result.gamma_over_2pi,
            result.g,
            result.error,
        ));
        let label = nucleus.label;
        report.derived.push(DerivedValue::new(
            format!("gamma_over_2pi_{label}"),
            result.gamma_over_2pi,
            "MHz/mT",
        ));
        report
            .derived
            .push(DerivedValue::new(format!("gamma_{label}"), result.gamma, "rad/(s·T)"));
        report.derived.push(DerivedValue::new(format!("g_{label}"), result.g, ""));
        if let Some(e) = result.error {
            report.derived.push(DerivedValue::new(format!("g_{label}_error"), e, "%"));
        }
        report.fits.push(FitRecord::Proportional {
            name: format!("{label} ν vs B0"),
            fit: result.fit,
        });
    }

    Ok(report)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slopes_match_lab_sheet() {
        let h = analyze(&HYDROGEN).unwrap();
        let f = analyze(&FLUORINE).unwrap();
        assert!((h.fit.slope - 0.042376).abs() < 1e-6);
        assert!((f.fit.slope - 0.039964).abs() < 1e-6);
        assert_eq!(h.gamma_over_2pi, 0.04238);
        assert_eq!(f.gamma_over_2pi, 0.03996);
    }

    #[test]
    fn g_factors_and_errors() {
        let h = analyze(&HYDROGEN).unwrap();
        assert!((h.g - 5.5598).abs() < 1e-4, "g={}", h.g);
        assert!((h.error.unwrap() - 0.4638).abs() < 1e-3);

        let f = analyze(&FLUORINE).unwrap();
        assert!((f.g - 5.2423).abs() < 1e-4, "g={}", f.g);
        assert!((f.error.unwrap() - 0.2933).abs() < 1e-3);
    }

    #[test]
    fn console_line_format() {
        let h = analyze(&HYDROGEN).unwrap();
        let line = format_nmr_line(HYDROGEN.label, h.gamma_over_2pi, h.g, h.error);
        assert_eq!(line, "1H: γ/2π = 0.04238 MHz/mT, g = 5.5598, Error = 0.4638%");
    }

    #[test]
    fn chart_legend_quotes_five_decimals() {
        let f = analyze(&FLUORINE).unwrap();
        let chart = chart(&FLUORINE, &f);
        assert_eq!(chart.file_name, "19F_nmr_plot.png");
        assert_eq!(chart.series[1].label, "Fit: γ/2π = 0.03996 MHz/mT");
    }

    #[test]
    fn rounding_helper() {
        assert_eq!(round_to(0.0423760325, 5), 0.04238);
        assert_eq!(round_to(-1.25, 1), -1.3);
    }
}
