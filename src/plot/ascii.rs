//! ASCII plotting of trend charts for terminal output.
//!
//! Fixed-size character grid, deterministic output. Each chart line gets its
//! own glyph (cycled); dashed lines only mark every other cell along each
//! segment. Rows are spaced evenly on the x axis in reference-key order.

use crate::views::LineChart;

const GLYPHS: [char; 8] = ['*', '+', 'o', 'x', '#', '@', '%', '&'];

/// Render `chart` into a `width` x `height` grid followed by a legend.
pub fn render_line_chart(chart: &LineChart, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut out = String::new();
    let Some((y_min, y_max)) = chart.y_range() else {
        out.push_str(&format!("Plot: {} | no data\n", chart.title));
        return out;
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);
    let x_max = (chart.rows.len().saturating_sub(1)).max(1) as f64;

    let mut grid = vec![vec![' '; width]; height];
    for (i, line) in chart.lines.iter().enumerate() {
        let glyph = GLYPHS[i % GLYPHS.len()];
        let points: Vec<(usize, usize)> = chart
            .points(line)
            .into_iter()
            .map(|(x, y)| (map_x(x, x_max, width), map_y(y, y_min, y_max, height)))
            .collect();
        draw_polyline(&mut grid, &points, glyph, line.dashed);
    }

    let first = chart.rows.first().map(|r| r.key.as_str()).unwrap_or("");
    let last = chart.rows.last().map(|r| r.key.as_str()).unwrap_or("");
    out.push_str(&format!(
        "Plot: {} | {}=[{first} .. {last}] | y=[{y_min:.2}, {y_max:.2}]\n",
        chart.title, chart.key_label
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }

    for (i, line) in chart.lines.iter().enumerate() {
        let style = if line.dashed { " (dashed)" } else { "" };
        out.push_str(&format!("  {} {}{style}\n", GLYPHS[i % GLYPHS.len()], line.label));
    }
    out
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span > 0.0 { span * frac } else { min.abs().max(1.0) * frac };
    (min - pad, max + pad)
}

fn map_x(x: f64, x_max: f64, width: usize) -> usize {
    let u = (x / x_max).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], points: &[(usize, usize)], ch: char, dashed: bool) {
    match points {
        [] => {}
        [(x, y)] => grid[*y][*x] = ch,
        _ => {
            for pair in points.windows(2) {
                draw_line(grid, pair[0], pair[1], ch, dashed);
            }
        }
    }
}

/// Integer line drawing (Bresenham). Cells already drawn by an earlier line
/// are left alone.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char, dashed: bool) {
    let (mut x0, mut y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut step = 0usize;

    loop {
        if (!dashed || step % 2 == 0)
            && y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
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
        step += 1;
    }
}
