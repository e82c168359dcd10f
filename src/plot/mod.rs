//! Chart rendering.
//!
//! A [`Chart`] is a render-only description: all series, labels and the
//! annotation are computed by the experiment before any drawing happens.
//! That keeps the drawing code focused on layout and makes the data prep easy
//! to test without producing images.
//!
//! - `chart`: PNG output through Plotters' bitmap backend
//! - `font`: runtime font discovery for text rasterization
//! - `ascii`: terminal preview used as the "display" step

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use plotters::style::RGBColor;
use thiserror::Error;

pub mod ascii;
pub mod chart;
pub mod font;

pub use chart::render_png;

/// Errors that can occur while writing a chart.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Plotting error for '{path}': {message}")]
    Drawing { path: PathBuf, message: String },

    #[error("Chart '{0}' has no finite data to draw")]
    EmptyChart(String),
}

pub const BLUE: RGBColor = RGBColor(31, 119, 180);
pub const RED: RGBColor = RGBColor(214, 39, 40);

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    /// Markers only (raw measurements).
    Points,
    /// Solid line only (fitted curve).
    Line,
    /// Solid line through markers (measured curves).
    LinePoints,
    /// Dashed line (secondary fitted curves).
    Dashed,
}

/// One named data series.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    pub style: SeriesStyle,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>, color: RGBColor, style: SeriesStyle) -> Self {
        Self {
            label: label.into(),
            points,
            color,
            style,
        }
    }
}

/// Free text placed at a data coordinate (typically the fit equation).
#[derive(Debug, Clone)]
pub struct Annotation {
    pub text: String,
    pub at: (f64, f64),
}

/// A render-only chart description.
#[derive(Debug, Clone)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// File name (not path) of the image, e.g. `IU_curves.png`.
    pub file_name: String,
    pub series: Vec<Series>,
    pub annotation: Option<Annotation>,
    /// Formatting of x tick labels.
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl Chart {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            file_name: file_name.into(),
            series: Vec::new(),
            annotation: None,
            fmt_x: fmt_plain,
            fmt_y: fmt_plain,
        }
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_annotation(mut self, text: impl Into<String>, at: (f64, f64)) -> Self {
        self.annotation = Some(Annotation { text: text.into(), at });
        self
    }

    pub fn with_x_format(mut self, fmt: fn(f64) -> String) -> Self {
        self.fmt_x = fmt;
        self
    }

    /// Data bounds over every series, padded by 5% on each side.
    ///
    /// `None` if no series holds a finite point.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let points = || self.series.iter().flat_map(|s| s.points.iter().copied());
        let (x0, x1) = crate::math::finite_range(points().map(|p| p.0))?;
        let (y0, y1) = crate::math::finite_range(points().map(|p| p.1))?;
        let (x0, x1) = pad_range(x0, x1, 0.05);
        let (y0, y1) = pad_range(y0, y1, 0.05);
        Some(([x0, x1], [y0, y1]))
    }
}

/// Write the chart into `out_dir` and optionally preview it in the terminal.
///
/// The preview only happens when `display` is set and stdout is an
/// interactive terminal; batch runs skip it silently. Returns the image path.
pub fn save_and_show(chart: &Chart, out_dir: &Path, size: (u32, u32), display: bool) -> Result<PathBuf, PlotError> {
    let path = out_dir.join(&chart.file_name);
    render_png(chart, &path, size)?;
    tracing::info!(path = %path.display(), "wrote chart");

    if display {
        let stdout = std::io::stdout();
        if stdout.is_terminal() {
            let (cols, rows) = crossterm::terminal::size().unwrap_or((100, 30));
            let width = (cols as usize).saturating_sub(2).clamp(20, 120);
            let height = (rows as usize / 2).clamp(8, 30);
            println!("{}", ascii::render_ascii_chart(chart, width, height));
        } else {
            tracing::debug!(chart = %chart.file_name, "stdout is not a terminal; skipping preview");
        }
    }

    Ok(path)
}

pub fn fmt_plain(v: f64) -> String {
    let a = v.abs();
    if a != 0.0 && !(1e-3..1e5).contains(&a) {
        format!("{v:.2e}")
    } else {
        format!("{v:.2}")
    }
}

pub fn fmt_sci(v: f64) -> String {
    format!("{v:.2e}")
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    if span == 0.0 {
        let pad = min.abs().max(1.0) * frac;
        return (min - pad, max + pad);
    }
    let pad = span * frac;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_series_with_padding() {
        let chart = Chart::new("t", "x", "y", "t.png")
            .with_series(Series::new("a", vec![(0.0, 0.0), (10.0, 5.0)], BLUE, SeriesStyle::Points))
            .with_series(Series::new("b", vec![(2.0, -5.0)], RED, SeriesStyle::Line));
        let ([x0, x1], [y0, y1]) = chart.bounds().unwrap();
        assert!((x0 + 0.5).abs() < 1e-12 && (x1 - 10.5).abs() < 1e-12);
        assert!((y0 + 5.5).abs() < 1e-12 && (y1 - 5.5).abs() < 1e-12);
    }

    #[test]
    fn bounds_of_single_point_are_not_empty() {
        let chart = Chart::new("t", "x", "y", "t.png")
            .with_series(Series::new("a", vec![(3.0, 3.0)], BLUE, SeriesStyle::Points));
        let ([x0, x1], [y0, y1]) = chart.bounds().unwrap();
        assert!(x1 > x0 && y1 > y0);
    }

    #[test]
    fn empty_chart_has_no_bounds() {
        let chart = Chart::new("t", "x", "y", "t.png");
        assert!(chart.bounds().is_none());
    }

    #[test]
    fn display_in_batch_run_still_writes_one_image() {
        let dir = tempfile::tempdir().unwrap();
        let chart = Chart::new("t", "x", "y", "shown.png")
            .with_series(Series::new("a", vec![(0.0, 1.0), (1.0, 2.0), (2.0, 4.0)], BLUE, SeriesStyle::LinePoints));

        let path = save_and_show(&chart, dir.path(), (320, 240), true).unwrap();
        assert_eq!(path, dir.path().join("shown.png"));
        assert!(path.is_file());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn tick_formats() {
        assert_eq!(fmt_plain(12.5), "12.50");
        assert_eq!(fmt_plain(8.214e14), "8.21e14");
        assert_eq!(fmt_sci(-4.06e-15), "-4.06e-15");
    }
}
