//! PNG chart rendering with Plotters.
//!
//! Layout: caption on top, mesh with axis descriptions, one drawn series per
//! [`Series`], a legend box in the upper-left corner and the optional
//! annotation. When no font could be registered the text elements are left
//! out and a plain grid is drawn instead of the labelled mesh, so a chart is
//! still produced.

use std::path::Path;

use plotters::prelude::*;

use crate::plot::font::{FAMILY, text_available};
use crate::plot::{Chart, PlotError, SeriesStyle};

const GRID: RGBColor = RGBColor(225, 225, 225);
const GRID_DIVISIONS: usize = 10;

/// Render `chart` to a PNG at `path`, overwriting any existing file.
pub fn render_png(chart: &Chart, path: &Path, size: (u32, u32)) -> Result<(), PlotError> {
    let Some(([x0, x1], [y0, y1])) = chart.bounds() else {
        return Err(PlotError::EmptyChart(chart.title.clone()));
    };
    let text = text_available();
    let err = |e: &dyn std::fmt::Display| PlotError::Drawing {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| err(&e))?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if text {
        builder
            .caption(&chart.title, (FAMILY, 24))
            .x_label_area_size(50)
            .y_label_area_size(80);
    }
    let mut ctx = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(|e| err(&e))?;

    if text {
        ctx.configure_mesh()
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .x_label_formatter(&|v| (chart.fmt_x)(*v))
            .y_label_formatter(&|v| (chart.fmt_y)(*v))
            .label_style((FAMILY, 14))
            .axis_desc_style((FAMILY, 16))
            .light_line_style(&GRID)
            .draw()
            .map_err(|e| err(&e))?;
    } else {
        for i in 0..=GRID_DIVISIONS {
            let u = i as f64 / GRID_DIVISIONS as f64;
            let x = x0 + u * (x1 - x0);
            let y = y0 + u * (y1 - y0);
            ctx.draw_series([
                PathElement::new(vec![(x, y0), (x, y1)], GRID.stroke_width(1)),
                PathElement::new(vec![(x0, y), (x1, y)], GRID.stroke_width(1)),
            ])
            .map_err(|e| err(&e))?;
        }
    }

    for series in &chart.series {
        let color = series.color;
        let style = series.style;
        let points = series
            .points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        let anno = match style {
            SeriesStyle::Points => ctx.draw_series(points.map(|p| Circle::new(p, 4, color.filled()))),
            SeriesStyle::Line => ctx.draw_series(LineSeries::new(points, color.stroke_width(2))),
            SeriesStyle::LinePoints => {
                ctx.draw_series(LineSeries::new(points, color.stroke_width(2)).point_size(3))
            }
            SeriesStyle::Dashed => {
                ctx.draw_series(DashedLineSeries::new(points, 10, 6, color.stroke_width(2)))
            }
        }
        .map_err(|e| err(&e))?;

        if text && !series.label.is_empty() {
            let (line, radius) = legend_glyph(color, style);
            anno.label(series.label.as_str()).legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(-10, 0), (10, 0)], line)
                    + Circle::new((0, 0), radius, color.filled())
            });
        }
    }

    if text {
        if let Some(note) = chart.annotation.as_ref().filter(|a| !a.text.is_empty()) {
            ctx.draw_series(std::iter::once(Text::new(
                note.text.clone(),
                note.at,
                (FAMILY, 16).into_font(),
            )))
            .map_err(|e| err(&e))?;
        }

        if chart.series.iter().any(|s| !s.label.is_empty()) {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .label_font((FAMILY, 14))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(|e| err(&e))?;
        }
    }

    root.present().map_err(|e| err(&e))?;
    Ok(())
}

/// Legend sample: line style and marker radius (a short segment, a marker, or both).
fn legend_glyph(color: RGBColor, style: SeriesStyle) -> (ShapeStyle, u32) {
    match style {
        SeriesStyle::Points => (color.mix(0.0).stroke_width(1), 4),
        SeriesStyle::LinePoints => (color.stroke_width(2), 4),
        SeriesStyle::Line | SeriesStyle::Dashed => (color.stroke_width(2), 0),
    }
}
