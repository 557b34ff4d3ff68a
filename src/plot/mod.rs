//! Terminal plots.

pub mod ascii;

pub use ascii::render_line_chart;
