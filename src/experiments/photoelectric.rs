//! Photoelectric effect and Franck–Hertz tube.
//!
//! Four charts:
//! - stopping voltage against light frequency, with the line whose slope gives
//!   Planck's constant
//! - photocurrent against anode voltage for the 436 nm and 546 nm lines
//! - saturation current against relative light intensity, one line per
//!   wavelength
//! - Franck–Hertz plate current against accelerating voltage, with the mean
//!   peak spacing reported as the first excitation potential

use crate::domain::{
    DerivedValue, ExperimentKind, ExperimentReport, FitRecord, LinearFit, RunConfig, Sample, zip_samples,
};
use crate::error::AppError;
use crate::experiments::{emit, evaluate, points};
use crate::fit::fit_linear;
use crate::physics::constants::PLANCK;
use crate::physics::{find_peaks, mean_peak_spacing, percent_error, photoelectric_constants};
use crate::plot::{BLUE, Chart, RED, Series, SeriesStyle, fmt_sci};
use crate::report::fmt_percent;

pub const STOPPING_FILE: &str = "stopping_voltage_vs_frequency.png";
pub const IU_FILE: &str = "IU_curves.png";
pub const IM_P_FILE: &str = "Im_P_curves_with_fits.png";
pub const FRANCK_HERTZ_FILE: &str = "Ip_VG2K_curve.png";

/// Mercury line frequencies (Hz).
pub const FREQUENCIES_HZ: [f64; 5] = [8.214e14, 7.408e14, 6.879e14, 5.490e14, 5.196e14];

/// Stopping voltage per line (V).
pub const STOPPING_VOLTAGES_V: [f64; 5] = [-1.7145, -1.3820, -1.1455, -0.59825, -0.4910];

/// Anode voltage of the I–U sweep (V).
pub const IU_VOLTAGES_V: [f64; 34] = [
    -4.0, -3.5, -3.0, -2.5, -2.0, -1.5, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0,
    14.0, 15.0, 16.0, 17.5, 19.0, 20.5, 22.0, 23.5, 25.0, 26.5, 28.0, 29.5, 30.0,
];

/// Photocurrent at 436 nm (10⁻¹³ A).
pub const IU_CURRENT_436: [f64; 34] = [
    -3.3, -3.3, -3.2, -3.2, -3.0, -2.5, 10.5, 136.0, 301.0, 858.0, 1520.0, 2150.0, 2580.0, 3090.0, 3430.0, 3680.0,
    3910.0, 4170.0, 4380.0, 4590.0, 4820.0, 5050.0, 5290.0, 5510.0, 5810.0, 6080.0, 6320.0, 6540.0, 6740.0, 6940.0,
    7110.0, 7260.0, 7440.0, 7530.0,
];

/// Photocurrent at 546 nm (10⁻¹³ A).
pub const IU_CURRENT_546: [f64; 34] = [
    -2.8, -2.8, -2.7, -2.7, -2.7, -2.6, -2.5, 10.8, 196.0, 704.0, 1450.0, 1950.0, 2300.0, 2530.0, 2700.0, 2820.0,
    2980.0, 3170.0, 3340.0, 3510.0, 3660.0, 3800.0, 3920.0, 4040.0, 4180.0, 4310.0, 4440.0, 4560.0, 4670.0, 4770.0,
    4860.0, 4930.0, 4990.0, 5030.0,
];

/// Aperture diameters (mm); the relative intensity is the diameter squared.
pub const APERTURE_DIAMETERS_MM: [f64; 3] = [2.0, 4.0, 8.0];

/// Saturation current per aperture (10⁻¹⁰ A).
pub const IM_CURRENT_436: [f64; 3] = [7.267, 29.767, 104.267];
pub const IM_CURRENT_546: [f64; 3] = [1.2, 4.9, 18.2];

/// Franck–Hertz plate current, one value per step of [`franck_hertz_voltages`].
pub const FH_PLATE_CURRENT: [f64; 119] = [
    0.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 4.0, 5.0, 6.0, 7.0, 9.0, 10.0, 11.0, 12.0, 13.0,
    14.0, 15.0, 18.0, 21.0, 24.0, 26.0, 27.0, 27.0, 26.0, 26.0, 27.0, 31.0, 37.0, 42.0, 46.0, 47.0, 45.0, 42.0, 40.0,
    41.0, 45.0, 54.0, 63.0, 70.0, 72.0, 69.0, 63.0, 58.0, 58.0, 63.0, 73.0, 85.0, 95.0, 100.0, 98.0, 90.0, 83.0, 80.0,
    83.0, 92.0, 104.0, 117.0, 126.0, 128.0, 122.0, 113.0, 106.0, 105.0, 110.0, 121.0, 134.0, 146.0, 153.0, 154.0,
    147.0, 138.0, 131.0, 131.0, 137.0, 148.0, 161.0, 173.0, 180.0, 180.0, 174.0, 165.0, 158.0, 158.0, 165.0, 176.0,
    189.0, 199.0, 206.0, 207.0, 203.0, 195.0, 189.0, 188.0, 194.0, 204.0, 216.0, 226.0, 233.0, 235.0, 232.0, 226.0,
    221.0, 220.0, 225.0, 233.0, 244.0, 253.0, 261.0, 264.0, 263.0, 264.0, 263.0,
];

/// Minimum prominence (plate-current units) of a Franck–Hertz peak.
pub const FH_MIN_PROMINENCE: f64 = 3.0;

/// Accelerating voltage grid: 0–4 V in 1 V steps, 4.5–60 V in 0.5 V steps,
/// then the two repeated end readings.
pub fn franck_hertz_voltages() -> Vec<f64> {
    let coarse = (0..5).map(f64::from);
    let fine = (0..112).map(|k| 4.5 + 0.5 * f64::from(k));
    coarse.chain(fine).chain([59.5, 60.0]).collect()
}

pub fn relative_intensity() -> [f64; 3] {
    APERTURE_DIAMETERS_MM.map(|d| d * d)
}

pub fn stopping_fit() -> Result<LinearFit, AppError> {
    Ok(fit_linear(&zip_samples(&FREQUENCIES_HZ, &STOPPING_VOLTAGES_V))?)
}

pub fn saturation_fits() -> Result<(LinearFit, LinearFit), AppError> {
    let phi = relative_intensity();
    let f436 = fit_linear(&zip_samples(&phi, &IM_CURRENT_436))?;
    let f546 = fit_linear(&zip_samples(&phi, &IM_CURRENT_546))?;
    Ok((f436, f546))
}

pub fn franck_hertz_samples() -> Vec<Sample> {
    zip_samples(&franck_hertz_voltages(), &FH_PLATE_CURRENT)
}

pub fn stopping_chart(fit: &LinearFit) -> Chart {
    Chart::new("Stopping Voltage vs Frequency", "Frequency (Hz)", "Stopping Voltage (V)", STOPPING_FILE)
        .with_x_format(fmt_sci)
        .with_series(Series::new(
            "Experimental Data",
            points(&FREQUENCIES_HZ, &STOPPING_VOLTAGES_V),
            BLUE,
            SeriesStyle::Points,
        ))
        .with_series(Series::new(
            format!("Fit: y = {:.2e}x + {:.2}", fit.slope, fit.intercept),
            evaluate(&FREQUENCIES_HZ, |x| fit.predict(x)),
            RED,
            SeriesStyle::Line,
        ))
}

pub fn iu_chart() -> Chart {
    Chart::new("I-U Curves for 436nm and 546nm", "Voltage (V)", "Current (10^-13 A)", IU_FILE)
        .with_series(Series::new(
            "436nm",
            points(&IU_VOLTAGES_V, &IU_CURRENT_436),
            BLUE,
            SeriesStyle::LinePoints,
        ))
        .with_series(Series::new(
            "546nm",
            points(&IU_VOLTAGES_V, &IU_CURRENT_546),
            RED,
            SeriesStyle::LinePoints,
        ))
}

pub fn saturation_chart(f436: &LinearFit, f546: &LinearFit) -> Chart {
    let phi = relative_intensity();
    let mut chart = Chart::new(
        "Im-P Curves with Linear Fits for Different Wavelengths",
        "Relative Light Intensity (Φ²)",
        "Current (10^-10 A)",
        IM_P_FILE,
    );
    for (label, currents, fit, color) in [("436nm", &IM_CURRENT_436, f436, BLUE), ("546nm", &IM_CURRENT_546, f546, RED)] {
        chart = chart
            .with_series(Series::new(
                format!("{label} Data"),
                points(&phi, currents),
                color,
                SeriesStyle::LinePoints,
            ))
            .with_series(Series::new(
                format!("{label} Fit: y={:.2}x + {:.2}", fit.slope, fit.intercept),
                evaluate(&phi, |x| fit.predict(x)),
                color,
                SeriesStyle::Dashed,
            ));
    }
    chart
}

pub fn franck_hertz_chart(samples: &[Sample]) -> Chart {
    Chart::new("Ip-VG2K Curve", "VG2K (V)", "Plate Current (Ip)", FRANCK_HERTZ_FILE).with_series(Series::new(
        "Ip vs VG2K",
        samples.iter().map(|s| (s.x, s.y)).collect(),
        BLUE,
        SeriesStyle::LinePoints,
    ))
}

pub fn run(config: &RunConfig) -> Result<ExperimentReport, AppError> {
    let mut report = ExperimentReport::new(ExperimentKind::Photoelectric);

    // Stopping voltage and Planck's constant.
    let stopping = stopping_fit()?;
    tracing::info!(slope = stopping.slope, intercept = stopping.intercept, "stopping voltage fit");
    emit(&stopping_chart(&stopping), config, &mut report)?;

    let constants = photoelectric_constants(stopping.slope, stopping.intercept)
        .ok_or_else(|| AppError::new(3, "stopping voltage does not depend on frequency"))?;
    let h_error = percent_error(constants.planck, PLANCK);
    report.console.push(format!(
        "Photoelectric: U0 = {:.4e}·ν + {:.4} V, h = {:.4e} J·s, Error = {}",
        stopping.slope,
        stopping.intercept,
        constants.planck,
        fmt_percent(h_error),
    ));
    report.console.push(format!(
        "Photoelectric: threshold ν0 = {:.4e} Hz, work function W = {:.4} eV",
        constants.threshold_frequency, constants.work_function_ev
    ));
    report.derived.push(DerivedValue::new("planck_constant", constants.planck, "J·s"));
    if let Some(e) = h_error {
        report.derived.push(DerivedValue::new("planck_constant_error", e, "%"));
    }
    report
        .derived
        .push(DerivedValue::new("threshold_frequency", constants.threshold_frequency, "Hz"));
    report
        .derived
        .push(DerivedValue::new("work_function", constants.work_function_ev, "eV"));
    report.fits.push(FitRecord::Linear {
        name: "stopping voltage vs frequency".into(),
        fit: stopping,
    });

    // I–U curves.
    emit(&iu_chart(), config, &mut report)?;

    // Saturation current against intensity.
    let (f436, f546) = saturation_fits()?;
    tracing::info!(
        slope_436 = f436.slope,
        slope_546 = f546.slope,
        "saturation current fits"
    );
    emit(&saturation_chart(&f436, &f546), config, &mut report)?;
    for (label, fit) in [("436nm", &f436), ("546nm", &f546)] {
        report.console.push(format!(
            "Im-P {label}: y = {:.2}x + {:.2} (R² = {:.4})",
            fit.slope, fit.intercept, fit.quality.r_squared
        ));
    }
    report.fits.push(FitRecord::Linear {
        name: "saturation current 436nm".into(),
        fit: f436,
    });
    report.fits.push(FitRecord::Linear {
        name: "saturation current 546nm".into(),
        fit: f546,
    });

    // Franck–Hertz.
    let fh = franck_hertz_samples();
    emit(&franck_hertz_chart(&fh), config, &mut report)?;
    let peaks = find_peaks(&fh, FH_MIN_PROMINENCE);
    let peak_voltages: Vec<f64> = peaks.iter().map(|p| p.x).collect();
    tracing::info!(peaks = ?peak_voltages, "Franck-Hertz peaks");
    match mean_peak_spacing(&peaks) {
        Some(spacing) => {
            report.console.push(format!(
                "Franck-Hertz: {} peaks, first excitation potential = {spacing:.3} V",
                peaks.len()
            ));
            report
                .derived
                .push(DerivedValue::new("first_excitation_potential", spacing, "V"));
        }
        None => {
            tracing::warn!(found = peaks.len(), "too few Franck-Hertz peaks for a spacing");
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn franck_hertz_grid_matches_current_table() {
        let v = franck_hertz_voltages();
        assert_eq!(v.len(), FH_PLATE_CURRENT.len());
        assert_eq!(v[4], 4.0);
        assert_eq!(v[5], 4.5);
        assert_eq!(v[116], 60.0);
        assert_eq!(&v[117..], &[59.5, 60.0]);
    }

    #[test]
    fn stopping_fit_gives_planck_constant() {
        let fit = stopping_fit().unwrap();
        assert!((fit.slope + 4.0579e-15).abs() < 1e-18, "slope={}", fit.slope);
        assert!((fit.intercept - 1.62715).abs() < 1e-4);

        let c = photoelectric_constants(fit.slope, fit.intercept).unwrap();
        assert!((c.planck - 6.5015e-34).abs() < 1e-37, "h={}", c.planck);
        assert!(percent_error(c.planck, PLANCK).unwrap() < 2.0);
    }

    #[test]
    fn saturation_current_is_linear_in_intensity() {
        let (f436, f546) = saturation_fits().unwrap();
        assert!((f436.slope - 1.5982).abs() < 1e-3);
        assert!((f436.intercept - 2.3503).abs() < 1e-3);
        assert!((f546.slope - 0.28155).abs() < 1e-4);
        assert!((f546.intercept - 0.21667).abs() < 1e-4);
    }

    #[test]
    fn franck_hertz_peaks_are_evenly_spaced() {
        let peaks = find_peaks(&franck_hertz_samples(), FH_MIN_PROMINENCE);
        let xs: Vec<f64> = peaks.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![20.5, 25.0, 29.5, 34.5, 39.5, 44.0, 49.5, 54.5]);
        let spacing = mean_peak_spacing(&peaks).unwrap();
        assert!((spacing - 34.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn stopping_chart_labels_fit_in_scientific_notation() {
        let chart = stopping_chart(&stopping_fit().unwrap());
        assert_eq!(chart.series[1].label, "Fit: y = -4.06e-15x + 1.63");
    }

    #[test]
    fn saturation_chart_has_data_and_fit_per_wavelength() {
        let (f436, f546) = saturation_fits().unwrap();
        let chart = saturation_chart(&f436, &f546);
        let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "436nm Data",
                "436nm Fit: y=1.60x + 2.35",
                "546nm Data",
                "546nm Fit: y=0.28x + 0.22"
            ]
        );
    }
}
