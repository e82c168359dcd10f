//! ASCII plotting for terminal output.
//!
//! A fixed-size character grid, good enough for:
//! - a quick look at a chart right after it was written
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - marker series: one glyph per series (`o`, `x`, `+`, `*`, ...)
//! - solid lines: `-`
//! - dashed lines: `.`

use crate::plot::{Chart, Series, SeriesStyle};

const MARKERS: [char; 6] = ['o', 'x', '+', '*', '#', '@'];

/// Render `chart` into a `width` x `height` grid preceded by a range header
/// and followed by a legend line.
pub fn render_ascii_chart(chart: &Chart, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let Some(([x_min, x_max], [y_min, y_max])) = chart.bounds() else {
        return format!("{}: (no data)\n", chart.title);
    };

    let mut grid = vec![vec![' '; width]; height];
    let map = |(x, y): (f64, f64)| {
        (
            map_x(x, x_min, x_max, width),
            map_y(y, y_min, y_max, height),
        )
    };

    // Lines first so markers overlay them.
    for series in &chart.series {
        let Some(ch) = line_glyph(series.style) else {
            continue;
        };
        let mut prev = None;
        for p in finite_points(series) {
            let (x, y) = map(p);
            match prev {
                Some((x0, y0)) => draw_line(&mut grid, x0, y0, x, y, ch),
                None => grid[y][x] = ch,
            }
            prev = Some((x, y));
        }
    }

    for (i, series) in chart.series.iter().enumerate() {
        if !matches!(series.style, SeriesStyle::Points | SeriesStyle::LinePoints) {
            continue;
        }
        let marker = MARKERS[i % MARKERS.len()];
        for p in finite_points(series) {
            let (x, y) = map(p);
            grid[y][x] = marker;
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}: x=[{}, {}] | y=[{}, {}]\n",
        chart.title,
        (chart.fmt_x)(x_min),
        (chart.fmt_x)(x_max),
        (chart.fmt_y)(y_min),
        (chart.fmt_y)(y_max),
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let legend: Vec<String> = chart
        .series
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.label.is_empty())
        .map(|(i, s)| {
            let glyph = match s.style {
                SeriesStyle::Points | SeriesStyle::LinePoints => MARKERS[i % MARKERS.len()],
                SeriesStyle::Line => '-',
                SeriesStyle::Dashed => '.',
            };
            format!("{glyph} {}", s.label)
        })
        .collect();
    if !legend.is_empty() {
        out.push_str(&format!("legend: {}\n", legend.join(" | ")));
    }

    out
}

fn line_glyph(style: SeriesStyle) -> Option<char> {
    match style {
        SeriesStyle::Points => None,
        SeriesStyle::Line | SeriesStyle::LinePoints => Some('-'),
        SeriesStyle::Dashed => Some('.'),
    }
}

fn finite_points(series: &Series) -> impl Iterator<Item = (f64, f64)> + '_ {
    series
        .points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y_max is row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham). Only fills blank cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        let cell = grid
            .get_mut(y0 as usize)
            .and_then(|row| row.get_mut(x0 as usize));
        if let Some(cell) = cell {
            if *cell == ' ' {
                *cell = ch;
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
