//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON
//! - passed between the experiment, plot and report layers without conversion

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single measurement: independent variable `x`, dependent variable `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Zip two equally long columns into samples, keeping table order.
///
/// Extra trailing values in the longer column are ignored.
pub fn zip_samples(xs: &[f64], ys: &[f64]) -> Vec<Sample> {
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| Sample::new(x, y))
        .collect()
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    /// Coefficient of determination against the mean of `y`.
    ///
    /// `1.0` when the data has no variance and the fit is exact.
    pub r_squared: f64,
    pub n: usize,
}

/// `y = slope·x + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub quality: FitQuality,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// `y = slope·x` (line through the origin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionalFit {
    pub slope: f64,
    pub quality: FitQuality,
}

impl ProportionalFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x
    }
}

/// `R(t) = r0·(1 + alpha·t)` for a metal resistor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResistanceFit {
    /// Resistance at 0 °C (Ω).
    pub r0: f64,
    /// Temperature coefficient (1/°C).
    pub alpha: f64,
    /// Solver iterations used.
    pub iterations: usize,
    pub quality: FitQuality,
}

impl ResistanceFit {
    pub fn predict(&self, t: f64) -> f64 {
        self.r0 * (1.0 + self.alpha * t)
    }
}

/// Which experiment(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentSpec {
    All,
    Resistance,
    Photoelectric,
    Nmr,
}

/// A concrete experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentKind {
    Resistance,
    Photoelectric,
    Nmr,
}

impl ExperimentKind {
    pub const ALL: [ExperimentKind; 3] = [
        ExperimentKind::Resistance,
        ExperimentKind::Photoelectric,
        ExperimentKind::Nmr,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ExperimentKind::Resistance => "Copper resistance vs temperature",
            ExperimentKind::Photoelectric => "Photoelectric effect / Franck-Hertz",
            ExperimentKind::Nmr => "Nuclear magnetic resonance",
        }
    }
}

impl ExperimentSpec {
    pub fn kinds(self) -> Vec<ExperimentKind> {
        match self {
            ExperimentSpec::All => ExperimentKind::ALL.to_vec(),
            ExperimentSpec::Resistance => vec![ExperimentKind::Resistance],
            ExperimentSpec::Photoelectric => vec![ExperimentKind::Photoelectric],
            ExperimentSpec::Nmr => vec![ExperimentKind::Nmr],
        }
    }
}

/// A named derived value (physical constant, error percentage, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedValue {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

impl DerivedValue {
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// A fit performed by an experiment, tagged with its model family.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum FitRecord {
    Linear {
        name: String,
        #[serde(flatten)]
        fit: LinearFit,
    },
    Proportional {
        name: String,
        #[serde(flatten)]
        fit: ProportionalFit,
    },
    Resistance {
        name: String,
        #[serde(flatten)]
        fit: ResistanceFit,
    },
}

impl FitRecord {
    pub fn name(&self) -> &str {
        match self {
            FitRecord::Linear { name, .. }
            | FitRecord::Proportional { name, .. }
            | FitRecord::Resistance { name, .. } => name,
        }
    }

    pub fn quality(&self) -> &FitQuality {
        match self {
            FitRecord::Linear { fit, .. } => &fit.quality,
            FitRecord::Proportional { fit, .. } => &fit.quality,
            FitRecord::Resistance { fit, .. } => &fit.quality,
        }
    }
}

/// Everything one experiment run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    pub kind: ExperimentKind,
    pub fits: Vec<FitRecord>,
    pub derived: Vec<DerivedValue>,
    /// Chart images written, in order.
    pub files: Vec<PathBuf>,
    /// Lines printed to stdout for this experiment.
    #[serde(skip)]
    pub console: Vec<String>,
}

impl ExperimentReport {
    pub fn new(kind: ExperimentKind) -> Self {
        Self {
            kind,
            fits: Vec::new(),
            derived: Vec::new(),
            files: Vec::new(),
            console: Vec::new(),
        }
    }

    /// Look up a derived value by name.
    pub fn derived_value(&self, name: &str) -> Option<f64> {
        self.derived.iter().find(|d| d.name == name).map(|d| d.value)
    }
}

/// A full run's configuration as understood by the experiments.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub experiments: ExperimentSpec,
    /// Directory the chart images are written to.
    pub out_dir: PathBuf,
    /// Print a terminal preview of each chart when stdout is interactive.
    pub display: bool,
    /// Iteration budget of the nonlinear solver.
    pub max_iterations: usize,
    /// Chart size in pixels.
    pub width: u32,
    pub height: u32,
    pub export: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            experiments: ExperimentSpec::All,
            out_dir: PathBuf::from("."),
            display: true,
            max_iterations: crate::fit::DEFAULT_MAX_ITERATIONS,
            width: 800,
            height: 600,
            export: None,
        }
    }
}
