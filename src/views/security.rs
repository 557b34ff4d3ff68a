//! Security page: safety/incident trends and district performance.

use crate::domain::{OverviewPayload, SecurityDistricts, SeriesGroup};
use crate::pivot::{pivot, series_then_group};

use super::fmt::{count_opt, fixed, month_label, plain_opt};
use super::{Accent, LineChart, MetricCard, Section, Table, trend_lines};

const CHART_TITLE: &str = "Security Performance Trends by District";
const NO_DATA: &str = "No security data available";

pub fn cards(overview: Option<&OverviewPayload>, security: Option<&SecurityDistricts>) -> Vec<MetricCard> {
    let kpis = overview.and_then(|o| o.security.clone()).unwrap_or_default();
    let response = security.and_then(average_response_minutes);
    let improvement = security.and_then(best_safety_improvement);

    vec![
        MetricCard::new(
            "Safety Score",
            format!("{}/10", plain_opt(kpis.avg_safety_score)),
            "Average District Score",
            Accent::Wayne,
        ),
        MetricCard::new(
            "Total Incidents",
            kpis.total_incidents
                .map(|n| count_opt(Some(n)))
                .unwrap_or_else(|| "0".to_string()),
            "Security Incidents",
            Accent::Green,
        ),
        MetricCard::new(
            "Response Time",
            format!("{} min", fixed(response, 1)),
            "Average Response",
            Accent::Blue,
        ),
        MetricCard::new(
            "Improvement",
            match improvement {
                Some(v) => format!("{v:+.1} pts"),
                None => "- pts".to_string(),
            },
            "Safety Score Growth",
            Accent::Purple,
        ),
    ]
}

/// Mean response time across districts that report one.
pub fn average_response_minutes(security: &SecurityDistricts) -> Option<f64> {
    let times: Vec<f64> = security
        .district_performance
        .iter()
        .filter_map(|d| d.response_time_minutes)
        .collect();
    (!times.is_empty()).then(|| times.iter().sum::<f64>() / times.len() as f64)
}

/// Largest last-minus-first change over the districts' safety series.
pub fn best_safety_improvement(security: &SecurityDistricts) -> Option<f64> {
    security
        .safety_trends
        .iter()
        .filter_map(|s| {
            let first = s.data.first()?.value_or_zero();
            let last = s.data.last()?.value_or_zero();
            Some(last - first)
        })
        .fold(None, |best: Option<f64>, d| Some(best.map_or(d, |b| b.max(d))))
}

/// Safety score (solid) and incidents (dashed) per district, keyed by month.
pub fn trend_chart(security: Option<&SecurityDistricts>) -> Section {
    let Some(security) = security else {
        return Section::empty(CHART_TITLE, NO_DATA);
    };

    let groups = [
        SeriesGroup::new("Safety", &security.safety_trends),
        SeriesGroup::new("Incidents", &security.incidents_trends),
    ];

    let mut rows = pivot(&groups, series_then_group);
    for row in &mut rows {
        row.key = month_label(&row.key);
    }

    Section::Line(LineChart {
        title: CHART_TITLE.to_string(),
        key_label: "date",
        lines: trend_lines(&groups, series_then_group),
        rows,
    })
}

pub fn district_table(security: Option<&SecurityDistricts>) -> Section {
    const TITLE: &str = "District Performance Summary";
    let Some(security) = security else {
        return Section::empty(TITLE, NO_DATA);
    };

    let mut table = Table::new(
        TITLE,
        &[
            "District",
            "Safety Score",
            "Incidents",
            "Response Time",
            "Prevention",
            "Employee Safety",
        ],
    );
    for d in &security.district_performance {
        table.rows.push(vec![
            d.district.clone(),
            format!("{}/10", fixed(d.public_safety_score, 1)),
            count_opt(d.security_incidents),
            format!("{} min", fixed(d.response_time_minutes, 1)),
            format!("{}%", fixed(d.crime_prevention_pct, 1)),
            format!("{}/10", fixed(d.employee_safety_index, 1)),
        ]);
    }
    Section::Table(table)
}
