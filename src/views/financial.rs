//! Financial page: revenue/profit trends and the division summary.

use crate::domain::{FinancialTrends, OverviewPayload, SeriesGroup};
use crate::pivot::{pivot, series_then_group};

use super::fmt::{plain_opt, thousands, thousands_opt};
use super::{Accent, LineChart, MetricCard, Section, Table, trend_lines};

const CHART_TITLE: &str = "Revenue & Profit Trends by Division";

pub fn cards(overview: Option<&OverviewPayload>) -> Vec<MetricCard> {
    let fin = overview.and_then(|o| o.financial.clone()).unwrap_or_default();
    vec![
        MetricCard::new(
            "Total Revenue",
            format!("${}M", thousands_opt(fin.total_revenue_m)),
            "Q4 2024",
            Accent::Wayne,
        ),
        MetricCard::new(
            "Total Profit",
            format!("${}M", thousands_opt(fin.total_profit_m)),
            format!("{}% margin", plain_opt(fin.profit_margin_pct)),
            Accent::Green,
        ),
        MetricCard::new(
            "Latest Revenue",
            format!("${}M", thousands_opt(fin.latest_revenue_m)),
            "Current Quarter",
            Accent::Blue,
        ),
        MetricCard::new(
            "Profit Margin",
            format!("{}%", plain_opt(fin.profit_margin_pct)),
            "Net Profit Ratio",
            Accent::Purple,
        ),
    ]
}

/// Revenue (solid) and profit (dashed) per division, keyed by period.
pub fn trend_chart(trends: Option<&FinancialTrends>) -> Section {
    let Some(trends) = trends else {
        return Section::empty(CHART_TITLE, "No financial data available");
    };

    let groups = [
        SeriesGroup::new("Revenue", &trends.revenue_trends),
        SeriesGroup::new("Profit", &trends.profit_trends),
    ];

    Section::Line(LineChart {
        title: CHART_TITLE.to_string(),
        key_label: "period",
        lines: trend_lines(&groups, series_then_group),
        rows: pivot(&groups, series_then_group),
    })
}

/// Latest revenue/profit/margin for one division.
#[derive(Debug, Clone, PartialEq)]
pub struct DivisionSummary {
    pub division: String,
    pub latest_revenue: f64,
    pub latest_profit: f64,
    pub margin_pct: f64,
}

/// Latest-period summary per revenue series.
///
/// Profit is read from the same-named profit series at the index of the
/// revenue series' last point. Margin is rounded to one decimal and is 0 when
/// revenue is not positive.
pub fn division_summaries(trends: &FinancialTrends) -> Vec<DivisionSummary> {
    trends
        .revenue_trends
        .iter()
        .map(|division| {
            let latest_revenue = division.data.last().map(|p| p.value_or_zero()).unwrap_or(0.0);
            let latest_profit = division
                .data
                .len()
                .checked_sub(1)
                .and_then(|idx| {
                    trends
                        .profit_trends
                        .iter()
                        .find(|p| p.name == division.name)
                        .and_then(|p| p.data.get(idx))
                })
                .map(|p| p.value_or_zero())
                .unwrap_or(0.0);
            let margin_pct = if latest_revenue > 0.0 {
                (latest_profit / latest_revenue * 1000.0).round() / 10.0
            } else {
                0.0
            };
            DivisionSummary {
                division: division.name.clone(),
                latest_revenue,
                latest_profit,
                margin_pct,
            }
        })
        .collect()
}

pub fn division_table(trends: Option<&FinancialTrends>) -> Section {
    const TITLE: &str = "Division Performance Summary";
    let Some(trends) = trends else {
        return Section::empty(TITLE, "No financial data available");
    };

    let mut table = Table::new(TITLE, &["Division", "Revenue (M)", "Profit (M)", "Margin %"]);
    for s in division_summaries(trends) {
        table.rows.push(vec![
            s.division,
            format!("${}", thousands(s.latest_revenue)),
            format!("${}", thousands(s.latest_profit)),
            format!("{:.1}%", s.margin_pct),
        ]);
    }
    Section::Table(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataPoint, FinancialKpis, Series};

    fn series(name: &str, points: &[(&str, f64)]) -> Series {
        Series::new(
            name,
            points.iter().map(|&(k, v)| DataPoint::new(k, v)).collect(),
        )
    }

    fn trends() -> FinancialTrends {
        FinancialTrends {
            revenue_trends: vec![
                series("Wayne Aerospace", &[("2024 Q1", 500.0), ("2024 Q2", 520.0)]),
                series("Wayne Biotech", &[("2024 Q1", 300.0)]),
            ],
            profit_trends: vec![
                series("Wayne Aerospace", &[("2024 Q1", 50.0), ("2024 Q2", 65.0)]),
                series("Wayne Biotech", &[]),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn chart_has_revenue_then_dashed_profit_lines() {
        let Section::Line(chart) = trend_chart(Some(&trends())) else {
            panic!("expected a line chart");
        };
        let labels: Vec<_> = chart.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Wayne Aerospace Revenue",
                "Wayne Biotech Revenue",
                "Wayne Aerospace Profit",
                "Wayne Biotech Profit"
            ]
        );
        assert!(!chart.lines[1].dashed);
        assert!(chart.lines[2].dashed);
        assert_eq!(chart.lines[0].color, chart.lines[2].color);

        assert_eq!(chart.rows.len(), 2);
        assert_eq!(chart.rows[1].get("Wayne Biotech Revenue"), Some(0.0));
        assert_eq!(chart.rows[1].get("Wayne Aerospace Profit"), Some(65.0));
    }

    #[test]
    fn summaries_use_latest_point_and_matching_profit() {
        let summaries = division_summaries(&trends());
        assert_eq!(summaries[0].latest_revenue, 520.0);
        assert_eq!(summaries[0].latest_profit, 65.0);
        assert_eq!(summaries[0].margin_pct, 12.5);
        // No profit point at the revenue's last index.
        assert_eq!(summaries[1].latest_profit, 0.0);
        assert_eq!(summaries[1].margin_pct, 0.0);
    }

    #[test]
    fn zero_revenue_has_zero_margin() {
        let t = FinancialTrends {
            revenue_trends: vec![series("A", &[("Q1", 0.0)])],
            profit_trends: vec![series("A", &[("Q1", 10.0)])],
            ..Default::default()
        };
        assert_eq!(division_summaries(&t)[0].margin_pct, 0.0);
    }

    #[test]
    fn cards_read_overview_kpis() {
        let overview = OverviewPayload {
            financial: Some(FinancialKpis {
                total_revenue_m: Some(12345.67),
                profit_margin_pct: Some(18.2),
                ..Default::default()
            }),
            ..Default::default()
        };
        let cards = cards(Some(&overview));
        assert_eq!(cards[0].value, "$12,345.67M");
        assert_eq!(cards[1].value, "$-M");
        assert_eq!(cards[1].caption, "18.2% margin");
        assert_eq!(cards[3].value, "18.2%");
    }

    #[test]
    fn missing_payload_is_empty_state() {
        assert_eq!(
            trend_chart(None),
            Section::empty(CHART_TITLE, "No financial data available")
        );
    }
}
