//! Text reports: a whole page rendered for `bi show`.

pub mod format;

pub use format::*;

use crate::plot::render_line_chart;
use crate::views::{PageView, Section};

/// Size of the optional ASCII plot under each line chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSize {
    pub width: usize,
    pub height: usize,
}

/// Render every section of `view` in order.
pub fn render_page(view: &PageView, plot: Option<PlotSize>) -> String {
    let mut out = format_heading(view.page);

    for section in &view.sections {
        out.push('\n');
        out.push_str(&format!("## {}\n", section.title()));
        match section {
            Section::Cards(cards) => out.push_str(&format_cards(cards)),
            Section::Line(chart) => {
                out.push_str(&format_line_chart(chart));
                if let Some(size) = plot {
                    out.push('\n');
                    out.push_str(&render_line_chart(chart, size.width, size.height));
                }
            }
            Section::Bars(chart) => out.push_str(&format_bars(chart)),
            Section::Distribution(dist) => out.push_str(&format_distribution(dist)),
            Section::Table(table) => out.push_str(&format_table(table)),
            Section::Narrative(n) => out.push_str(&format_narrative(n)),
            Section::Bullets { items, .. } => out.push_str(&format_bullets(items)),
            Section::Empty { message, .. } => {
                out.push_str(&format!("  ({message})\n"));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PageData;
    use crate::domain::Page;
    use crate::views::build;

    #[test]
    fn empty_page_lists_no_data_messages() {
        let view = build(Page::Financial, &PageData::default());
        let txt = render_page(&view, None);
        assert!(txt.starts_with("=== Wayne Enterprises BI | "));
        assert!(txt.contains("## Revenue & Profit Trends by Division\n  (No financial data available)\n"));
        assert!(txt.contains("## Key Metrics\n"));
    }
}
