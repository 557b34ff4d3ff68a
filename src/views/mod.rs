//! Presentation models for each dashboard page.
//!
//! A view turns the typed payloads in [`PageData`] into render-ready
//! sections: metric cards, line charts (built with [`crate::pivot`]), bar
//! charts, distributions, tables, and narrative text. Both front-ends (the
//! plain-text report and the TUI) draw from these models, so presentation
//! rules live in exactly one place.
//!
//! Views never fail. An absent payload becomes a [`Section::Empty`] with the
//! same "No ... data available" message for every front-end.

use clap::ValueEnum;

use crate::data::PageData;
use crate::domain::{Page, PivotedRow};

pub mod financial;
pub mod fmt;
pub mod hr;
pub mod news;
pub mod overview;
pub mod rd;
pub mod security;
pub mod supply_chain;

/// Line colours, cycled by series index within a group.
pub const PALETTE: [(u8, u8, u8); 6] = [
    (0x0e, 0xa5, 0xe9),
    (0x10, 0xb9, 0x81),
    (0xf5, 0x9e, 0x0b),
    (0xef, 0x44, 0x44),
    (0x8b, 0x5c, 0xf6),
    (0x06, 0xb6, 0xd4),
];

/// Card accent colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Wayne,
    Green,
    Blue,
    Purple,
    Orange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub caption: String,
    pub accent: Accent,
}

impl MetricCard {
    pub fn new(
        title: impl Into<String>,
        value: impl Into<String>,
        caption: impl Into<String>,
        accent: Accent,
    ) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            caption: caption.into(),
            accent,
        }
    }
}

/// One drawn line of a [`LineChart`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    /// Column label in the pivoted rows.
    pub label: String,
    pub color: (u8, u8, u8),
    pub dashed: bool,
}

/// Multi-series line chart over pivoted rows.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    /// Name of the row-key column (`period` or `date`).
    pub key_label: &'static str,
    pub lines: Vec<ChartLine>,
    pub rows: Vec<PivotedRow>,
}

impl LineChart {
    /// `(row index, value)` points for one line.
    pub fn points(&self, line: &ChartLine) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i as f64, row.get(&line.label).unwrap_or(0.0)))
            .collect()
    }

    /// Min/max over every plotted value, `None` when nothing is plotted.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for row in &self.rows {
            for line in &self.lines {
                let v = row.get(&line.label).unwrap_or(0.0);
                if v.is_finite() {
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
            }
        }
        (lo.is_finite() && hi.is_finite()).then_some((lo, hi))
    }
}

/// Grouped bar chart: one group per category, one bar per series.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: String,
    pub color: (u8, u8, u8),
    /// One value per category.
    pub values: Vec<u64>,
}

/// Named counts (pie-style distribution).
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub title: String,
    pub slices: Vec<(String, u64)>,
}

impl Distribution {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeView {
    pub headline: String,
    pub subheadline: String,
    pub key_points: Vec<String>,
    /// `(label, formatted value)`.
    pub metrics: Vec<(String, String)>,
}

/// One block of a rendered page.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Cards(Vec<MetricCard>),
    Line(LineChart),
    Bars(BarChart),
    Distribution(Distribution),
    Table(Table),
    Narrative(NarrativeView),
    Bullets { title: String, items: Vec<String> },
    Empty { title: String, message: String },
}

impl Section {
    pub fn empty(title: impl Into<String>, message: impl Into<String>) -> Self {
        Section::Empty {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Section::Cards(_) => "Key Metrics",
            Section::Line(c) => &c.title,
            Section::Bars(c) => &c.title,
            Section::Distribution(d) => &d.title,
            Section::Table(t) => &t.title,
            Section::Narrative(_) => "Business Intelligence Report",
            Section::Bullets { title, .. } => title,
            Section::Empty { title, .. } => title,
        }
    }
}

/// A fully built page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub page: Page,
    pub sections: Vec<Section>,
}

/// Build the view for `page` from whatever data was loaded.
pub fn build(page: Page, data: &PageData) -> PageView {
    let overview = data.overview.as_ref();
    let sections = match page {
        Page::Overview => {
            let mut s = vec![
                Section::Cards(overview::executive_cards(overview)),
                financial::trend_chart(data.financial.as_ref()),
                hr::department_chart(data.hr.as_ref()),
                security::trend_chart(data.security.as_ref()),
            ];
            s.extend(rd::portfolio_charts(data.rd.as_ref()));
            s.push(supply_chain::trend_chart(data.supply_chain.as_ref()));
            s.push(news::narrative(data.news.as_ref()));
            s
        }
        Page::Financial => vec![
            Section::Cards(financial::cards(overview)),
            financial::trend_chart(data.financial.as_ref()),
            financial::division_table(data.financial.as_ref()),
        ],
        Page::Hr => vec![
            Section::Cards(hr::cards(overview, data.hr.as_ref())),
            hr::department_chart(data.hr.as_ref()),
            hr::distribution_table(data.hr.as_ref()),
            hr::level_table(data.hr.as_ref()),
        ],
        Page::Security => vec![
            Section::Cards(security::cards(overview, data.security.as_ref())),
            security::trend_chart(data.security.as_ref()),
            security::district_table(data.security.as_ref()),
        ],
        Page::Rd => {
            let mut s = vec![Section::Cards(rd::cards(overview, data.rd.as_ref()))];
            s.extend(rd::portfolio_charts(data.rd.as_ref()));
            s.push(rd::potential_distribution(data.rd.as_ref()));
            s.push(rd::division_table(data.rd.as_ref()));
            s
        }
        Page::SupplyChain => vec![
            Section::Cards(supply_chain::cards(data.supply_chain.as_ref())),
            supply_chain::trend_chart(data.supply_chain.as_ref()),
            supply_chain::facility_table(data.supply_chain.as_ref()),
        ],
        Page::News => vec![
            Section::Cards(overview::executive_cards(overview)),
            news::narrative(data.news.as_ref()),
            news::insights(overview),
        ],
    };

    PageView { page, sections }
}

/// Charts that can be exported as pivoted tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TrendChart {
    Financial,
    Security,
    SupplyChain,
}

impl TrendChart {
    /// Page whose data feeds this chart.
    pub fn page(self) -> Page {
        match self {
            TrendChart::Financial => Page::Financial,
            TrendChart::Security => Page::Security,
            TrendChart::SupplyChain => Page::SupplyChain,
        }
    }

    /// Build the chart, `None` when the payload is absent.
    pub fn build(self, data: &PageData) -> Option<LineChart> {
        let section = match self {
            TrendChart::Financial => financial::trend_chart(data.financial.as_ref()),
            TrendChart::Security => security::trend_chart(data.security.as_ref()),
            TrendChart::SupplyChain => supply_chain::trend_chart(data.supply_chain.as_ref()),
        };
        match section {
            Section::Line(chart) => Some(chart),
            _ => None,
        }
    }
}

/// Lines for a two-group trend chart: solid first group, dashed second.
pub(crate) fn trend_lines(
    groups: &[crate::domain::SeriesGroup<'_>],
    label: fn(&str, &str) -> String,
) -> Vec<ChartLine> {
    groups
        .iter()
        .enumerate()
        .flat_map(|(gi, group)| {
            group.series.iter().enumerate().map(move |(si, s)| ChartLine {
                label: label(group.label, &s.name),
                color: PALETTE[si % PALETTE.len()],
                dashed: gi > 0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_renders_empty_sections_without_data() {
        let data = PageData::default();
        for page in Page::ALL {
            let view = build(page, &data);
            assert!(!view.sections.is_empty(), "{page:?} has no sections");
            let has_content = view.sections.iter().any(|s| {
                matches!(
                    s,
                    Section::Line(_) | Section::Bars(_) | Section::Table(_) | Section::Narrative(_)
                )
            });
            assert!(!has_content, "{page:?} rendered content from nothing");
        }
    }

    #[test]
    fn trend_chart_export_needs_payload() {
        let data = PageData::default();
        assert!(TrendChart::Financial.build(&data).is_none());
        assert_eq!(TrendChart::SupplyChain.page(), Page::SupplyChain);
    }
}
