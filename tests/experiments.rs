use std::path::Path;

use lab_fits::app::pipeline::run_experiments;
use lab_fits::domain::{ExperimentKind, ExperimentSpec, RunConfig};

fn config(spec: ExperimentSpec, out_dir: &Path) -> RunConfig {
    RunConfig {
        experiments: spec,
        out_dir: out_dir.to_path_buf(),
        display: false,
        width: 480,
        height: 360,
        ..RunConfig::default()
    }
}

fn png_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort();
    names
}

#[test]
fn resistance_run_writes_chart_and_fits_table() {
    let dir = tempfile::tempdir().unwrap();
    let reports = run_experiments(&config(ExperimentSpec::Resistance, dir.path()), |_| {}).unwrap();

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.kind, ExperimentKind::Resistance);

    let r0 = report.derived_value("R0").unwrap();
    let alpha = report.derived_value("alpha").unwrap();
    assert!((r0 - 50.15).abs() < 0.01, "r0={r0}");
    assert!((alpha - 0.0042).abs() < 1e-5, "alpha={alpha}");

    assert_eq!(png_names(dir.path()), vec!["铜电阻温度特性曲线.png".to_string()]);
}

#[test]
fn photoelectric_run_writes_four_charts() {
    let dir = tempfile::tempdir().unwrap();
    let reports = run_experiments(&config(ExperimentSpec::Photoelectric, dir.path()), |_| {}).unwrap();
    let report = &reports[0];

    assert_eq!(
        png_names(dir.path()),
        vec![
            "IU_curves.png",
            "Im_P_curves_with_fits.png",
            "Ip_VG2K_curve.png",
            "stopping_voltage_vs_frequency.png",
        ]
    );
    assert_eq!(report.files.len(), 4);
    assert_eq!(report.fits.len(), 3);

    let h = report.derived_value("planck_constant").unwrap();
    assert!((h - 6.50e-34).abs() < 0.01e-34, "h={h}");
    let spacing = report.derived_value("first_excitation_potential").unwrap();
    assert!((spacing - 4.857).abs() < 1e-3);
}

#[test]
fn nmr_run_prints_one_line_per_nucleus() {
    let dir = tempfile::tempdir().unwrap();
    let mut printed = Vec::new();
    run_experiments(&config(ExperimentSpec::Nmr, dir.path()), |r| {
        printed.extend(r.console.iter().cloned());
    })
    .unwrap();

    assert_eq!(
        printed,
        vec![
            "1H: γ/2π = 0.04238 MHz/mT, g = 5.5598, Error = 0.4638%".to_string(),
            "19F: γ/2π = 0.03996 MHz/mT, g = 5.2423, Error = 0.2933%".to_string(),
        ]
    );
    assert_eq!(png_names(dir.path()), vec!["19F_nmr_plot.png", "1H_nmr_plot.png"]);
}

#[test]
fn full_run_creates_out_dir_and_exports_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("charts");
    let export = dir.path().join("results.json");
    let cfg = RunConfig {
        export: Some(export.clone()),
        ..config(ExperimentSpec::All, &out)
    };

    let reports = run_experiments(&cfg, |_| {}).unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(png_names(&out).len(), 7);

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
    let kinds: Vec<&str> = json["experiments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["resistance", "photoelectric", "nmr"]);
}

#[test]
fn linear_starting_point_needs_a_single_solver_iteration() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = RunConfig {
        max_iterations: 1,
        ..config(ExperimentSpec::Resistance, dir.path())
    };
    let reports = run_experiments(&cfg, |_| {}).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].derived_value("R0").is_some());
}
