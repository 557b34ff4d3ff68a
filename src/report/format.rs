//! Plain-text formatting of page sections.
//!
//! All terminal output of `bi show` is built here so the views stay free of
//! layout concerns and the output can be asserted on in tests.

use crate::domain::Page;
use crate::views::fmt::thousands;
use crate::views::{BarChart, Distribution, LineChart, MetricCard, NarrativeView, Table};

/// Widest a table cell may get before it is truncated.
const MAX_CELL: usize = 28;

pub fn format_heading(page: Page) -> String {
    let (title, subtitle) = page.heading();
    format!("=== Wayne Enterprises BI | {title} ===\n{subtitle}\n")
}

pub fn format_cards(cards: &[MetricCard]) -> String {
    let mut out = String::new();
    for c in cards {
        out.push_str(
            format!(
                "{:<24} {:>16}  {}",
                truncate(&c.title, 24),
                truncate(&c.value, 16),
                c.caption
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Column-aligned table: first column left-aligned, the rest right-aligned.
pub fn format_table(table: &Table) -> String {
    let ncols = table.headers.len();
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count().min(MAX_CELL)).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate().take(ncols) {
            widths[i] = widths[i].max(cell.chars().count().min(MAX_CELL));
        }
    }

    let mut out = String::new();
    push_row(&mut out, &table.headers, &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join(" "));
    out.push('\n');
    for row in &table.rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let parts: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let cell = truncate(cells.get(i).map(String::as_str).unwrap_or(""), MAX_CELL);
            if i == 0 {
                format!("{cell:<w$}")
            } else {
                format!("{cell:>w$}")
            }
        })
        .collect();
    out.push_str(parts.join(" ").trim_end());
    out.push('\n');
}

/// The pivoted rows of a line chart as a table, one column per line.
pub fn format_line_chart(chart: &LineChart) -> String {
    let mut headers = vec![chart.key_label];
    headers.extend(chart.lines.iter().map(|l| l.label.as_str()));
    let mut table = Table::new(chart.title.clone(), &headers);
    for row in &chart.rows {
        let mut cells = vec![row.key.clone()];
        cells.extend(
            chart
                .lines
                .iter()
                .map(|l| thousands(row.get(&l.label).unwrap_or(0.0))),
        );
        table.rows.push(cells);
    }
    format_table(&table)
}

pub fn format_bars(chart: &BarChart) -> String {
    let mut headers = vec!["Category"];
    headers.extend(chart.series.iter().map(|s| s.label.as_str()));
    let mut table = Table::new(chart.title.clone(), &headers);
    for (i, category) in chart.categories.iter().enumerate() {
        let mut cells = vec![category.clone()];
        cells.extend(
            chart
                .series
                .iter()
                .map(|s| s.values.get(i).map(u64::to_string).unwrap_or_default()),
        );
        table.rows.push(cells);
    }
    format_table(&table)
}

pub fn format_distribution(dist: &Distribution) -> String {
    let total = dist.total();
    let mut table = Table::new(dist.title.clone(), &["Category", "Count", "Share"]);
    for (name, count) in &dist.slices {
        let share = if total > 0 {
            *count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        table
            .rows
            .push(vec![name.clone(), count.to_string(), format!("{share:.1}%")]);
    }
    format_table(&table)
}

pub fn format_narrative(n: &NarrativeView) -> String {
    let mut out = String::new();
    out.push_str(&n.headline);
    out.push('\n');
    if !n.subheadline.is_empty() {
        out.push_str(&n.subheadline);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&format_bullets(&n.key_points));
    out.push('\n');
    for (label, value) in &n.metrics {
        out.push_str(&format!("{label:<20} {value}\n"));
    }
    out
}

pub fn format_bullets(items: &[String]) -> String {
    items.iter().map(|i| format!("  - {i}\n")).collect()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::PivotedRow;
    use crate::views::{Accent, ChartLine};

    #[test]
    fn table_aligns_columns() {
        let mut t = Table::new("T", &["Division", "Revenue (M)"]);
        t.rows.push(vec!["Aerospace".to_string(), "$1,200".to_string()]);
        t.rows.push(vec!["Biotech".to_string(), "$87.5".to_string()]);
        assert_eq!(
            format_table(&t),
            concat!(
                "Division  Revenue (M)\n",
                "--------- -----------\n",
                "Aerospace      $1,200\n",
                "Biotech         $87.5\n",
            )
        );
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn line_chart_renders_pivot_rows() {
        let chart = LineChart {
            title: "Trends".to_string(),
            key_label: "period",
            lines: vec![ChartLine {
                label: "A Revenue".to_string(),
                color: (0, 0, 0),
                dashed: false,
            }],
            rows: vec![PivotedRow {
                key: "2024 Q1".to_string(),
                values: BTreeMap::from([("A Revenue".to_string(), 1500.0)]),
            }],
        };
        let txt = format_line_chart(&chart);
        assert_eq!(txt.lines().nth(2), Some("2024 Q1     1,500"));
    }

    #[test]
    fn distribution_shares() {
        let d = Distribution {
            title: "Status".to_string(),
            slices: vec![("Active".to_string(), 3), ("Done".to_string(), 1)],
        };
        let txt = format_distribution(&d);
        assert!(txt.contains("Active       3 75.0%"));
        assert!(txt.contains("Done         1 25.0%"));
    }

    #[test]
    fn cards_are_one_per_line() {
        let cards = vec![MetricCard::new("Total Revenue", "$1M", "Q4 2024", Accent::Wayne)];
        let txt = format_cards(&cards);
        assert_eq!(txt.lines().count(), 1);
        assert!(txt.ends_with("$1M  Q4 2024\n"));
    }
}
