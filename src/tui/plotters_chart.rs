//! Plotters-powered trend chart widget for Ratatui.
//!
//! Plotters output is drawn into the Ratatui buffer with
//! `plotters-ratatui-backend`. The x axis is the row index of the pivoted
//! chart; tick labels map back to the row keys.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::views::LineChart;

/// Render-only view of a [`LineChart`]. Bounds are computed by the caller.
pub struct TrendPlottersChart<'a> {
    pub chart: &'a LineChart,
    pub y_bounds: [f64; 2],
}

impl<'a> TrendPlottersChart<'a> {
    /// Chart with y bounds padded around the plotted values.
    pub fn new(chart: &'a LineChart) -> Option<Self> {
        let (lo, hi) = chart.y_range()?;
        let span = (hi - lo).abs();
        let pad = if span > 0.0 { span * 0.05 } else { lo.abs().max(1.0) * 0.05 };
        Some(Self {
            chart,
            y_bounds: [lo - pad, hi + pad],
        })
    }
}

impl Widget for TrendPlottersChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.chart.rows.len();
        let x1 = (n.saturating_sub(1)).max(1) as f64;
        let [y0, y1] = self.y_bounds;
        if !(y0.is_finite() && y1.is_finite()) || y1 <= y0 {
            return;
        }

        let keys: Vec<&str> = self.chart.rows.iter().map(|r| r.key.as_str()).collect();
        let series: Vec<(RGBColor, bool, Vec<(f64, f64)>)> = self
            .chart
            .lines
            .iter()
            .map(|line| {
                let (r, g, b) = line.color;
                (RGBColor(r, g, b), line.dashed, self.chart.points(line))
            })
            .collect();

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(0.0..x1, y0..y1)?;

            // Mesh lines are noise at terminal resolution; axes and labels only.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(keys.len().clamp(2, 6))
                .y_labels(5)
                .x_label_formatter(&|v| x_tick(&keys, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for (color, dashed, points) in &series {
                if *dashed {
                    chart.draw_series(
                        dashes(points).map(|seg| PathElement::new(seg, color)),
                    )?;
                } else {
                    chart.draw_series(LineSeries::new(points.iter().copied(), color))?;
                }
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Row key for an x tick, blank between rows.
fn x_tick(keys: &[&str], v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    keys.get(idx as usize).map(|k| k.to_string()).unwrap_or_default()
}

/// Split a polyline into alternating drawn pieces: each segment is cut into
/// four and pieces 0 and 2 are kept.
fn dashes(points: &[(f64, f64)]) -> impl Iterator<Item = Vec<(f64, f64)>> + '_ {
    const PIECES: usize = 4;
    points.windows(2).flat_map(|w| {
        let ((xa, ya), (xb, yb)) = (w[0], w[1]);
        let at = move |u: f64| (xa + (xb - xa) * u, ya + (yb - ya) * u);
        (0..PIECES).step_by(2).map(move |i| {
            let u0 = i as f64 / PIECES as f64;
            let u1 = (i + 1) as f64 / PIECES as f64;
            vec![at(u0), at(u1)]
        })
    })
}
