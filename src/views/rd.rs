//! R&D page: project status, budget allocation, and commercialization potential.

use crate::domain::{OverviewPayload, RdPortfolio};

use super::fmt::{bar_value, count_opt, fixed_or, plain_opt, strip_company, thousands_opt};
use super::{Accent, BarChart, BarSeries, Distribution, MetricCard, PALETTE, Section, Table};

const NO_DATA: &str = "No R&D data available";
const STATUS_TITLE: &str = "Project Status Distribution";
const BUDGET_TITLE: &str = "Budget Allocation by Division";

/// Potential bucket counted by the "High Potential" card.
pub const TOP_POTENTIAL: &str = "Very High";

pub fn cards(overview: Option<&OverviewPayload>, rd: Option<&RdPortfolio>) -> Vec<MetricCard> {
    let kpis = overview.and_then(|o| o.rd.clone()).unwrap_or_default();
    let high_potential = rd.map(very_high_count).unwrap_or(0);

    vec![
        MetricCard::new(
            "Active Projects",
            kpis.active_projects.unwrap_or(0).to_string(),
            "Currently Running",
            Accent::Wayne,
        ),
        MetricCard::new(
            "Total Budget",
            format!("${}M", thousands_opt(kpis.total_budget_m)),
            "Allocated Budget",
            Accent::Green,
        ),
        MetricCard::new(
            "Completion Rate",
            format!("{}%", plain_opt(kpis.completion_rate_pct)),
            "Project Success",
            Accent::Blue,
        ),
        MetricCard::new(
            "High Potential",
            high_potential.to_string(),
            "Very High Potential",
            Accent::Purple,
        ),
    ]
}

/// Count of the first `Very High` potential bucket, 0 when there is none.
pub fn very_high_count(rd: &RdPortfolio) -> u64 {
    rd.potential_distribution
        .iter()
        .find(|p| p.potential == TOP_POTENTIAL)
        .map(|p| p.count)
        .unwrap_or(0)
}

/// Status distribution followed by allocated/spent budget bars.
pub fn portfolio_charts(rd: Option<&RdPortfolio>) -> Vec<Section> {
    let Some(rd) = rd else {
        return vec![
            Section::empty(STATUS_TITLE, NO_DATA),
            Section::empty(BUDGET_TITLE, NO_DATA),
        ];
    };

    let status = Distribution {
        title: STATUS_TITLE.to_string(),
        slices: rd
            .status_distribution
            .iter()
            .map(|s| (s.status.clone(), s.count))
            .collect(),
    };

    let divisions = &rd.portfolio_summary;
    let budget = BarChart {
        title: BUDGET_TITLE.to_string(),
        categories: divisions.iter().map(|d| strip_company(&d.division)).collect(),
        series: vec![
            BarSeries {
                label: "Budget Allocated".to_string(),
                color: PALETTE[0],
                values: divisions.iter().map(|d| bar_value(d.budget_allocated_m)).collect(),
            },
            BarSeries {
                label: "Budget Spent".to_string(),
                color: PALETTE[1],
                values: divisions.iter().map(|d| bar_value(d.budget_spent_m)).collect(),
            },
        ],
    };

    vec![Section::Distribution(status), Section::Bars(budget)]
}

pub fn potential_distribution(rd: Option<&RdPortfolio>) -> Section {
    const TITLE: &str = "Commercialization Potential";
    match rd {
        Some(rd) => Section::Distribution(Distribution {
            title: TITLE.to_string(),
            slices: rd
                .potential_distribution
                .iter()
                .map(|p| (p.potential.clone(), p.count))
                .collect(),
        }),
        None => Section::empty(TITLE, NO_DATA),
    }
}

/// Per-division portfolio, with timeline adherence looked up by exact
/// division name.
pub fn division_table(rd: Option<&RdPortfolio>) -> Section {
    const TITLE: &str = "Division Performance Summary";
    let Some(rd) = rd else {
        return Section::empty(TITLE, NO_DATA);
    };

    let mut table = Table::new(
        TITLE,
        &[
            "Division",
            "Projects",
            "Budget (M)",
            "Spent (M)",
            "High Potential",
            "Timeline %",
        ],
    );
    for d in &rd.portfolio_summary {
        let timeline = rd
            .timeline_data
            .iter()
            .find(|t| t.division == d.division)
            .and_then(|t| t.timeline_adherence_pct);
        table.rows.push(vec![
            strip_company(&d.division),
            count_opt(d.project_count),
            format!("${}", thousands_opt(d.budget_allocated_m)),
            format!("${}", thousands_opt(d.budget_spent_m)),
            count_opt(d.high_potential_projects),
            format!("{}%", fixed_or(timeline, 1, "N/A")),
        ]);
    }
    Section::Table(table)
}
