//! HR page: department bars, employee distribution, and level breakdown.

use crate::domain::{DepartmentPerformance, HrPerformance, LevelPerformance, OverviewPayload};

use super::fmt::{bar_value, count_opt, fixed, fixed_or, plain_opt, strip_company};
use super::{Accent, BarChart, BarSeries, MetricCard, PALETTE, Section, Table};

const NO_DATA: &str = "No HR data available";

pub fn cards(overview: Option<&OverviewPayload>, hr: Option<&HrPerformance>) -> Vec<MetricCard> {
    let kpis = overview.and_then(|o| o.hr.clone()).unwrap_or_default();
    let training = hr.and_then(|h| {
        let hours: Vec<f64> = h
            .department_performance
            .iter()
            .filter_map(|d| d.training_hours_annual)
            .collect();
        (!hours.is_empty()).then(|| hours.iter().sum::<f64>() / hours.len() as f64)
    });

    vec![
        MetricCard::new(
            "Total Employees",
            kpis.total_employees
                .map(|n| count_opt(Some(n)))
                .unwrap_or_else(|| "0".to_string()),
            "Active Workforce",
            Accent::Wayne,
        ),
        MetricCard::new(
            "Retention Rate",
            format!("{}%", plain_opt(kpis.avg_retention_pct)),
            "Average Retention",
            Accent::Green,
        ),
        MetricCard::new(
            "Satisfaction Score",
            format!("{}/10", plain_opt(kpis.avg_satisfaction_score)),
            "Employee Satisfaction",
            Accent::Blue,
        ),
        MetricCard::new(
            "Training Hours",
            format!("{} hrs", fixed(training, 0)),
            "Annual Average",
            Accent::Purple,
        ),
    ]
}

/// Department metrics scaled onto one axis: retention as-is, satisfaction
/// x10, training hours /10, performance rating x20.
pub fn department_chart(hr: Option<&HrPerformance>) -> Section {
    const TITLE: &str = "HR Performance by Department";
    let Some(hr) = hr else {
        return Section::empty(TITLE, NO_DATA);
    };

    let depts = &hr.department_performance;

    Section::Bars(BarChart {
        title: TITLE.to_string(),
        categories: depts.iter().map(|d| strip_company(&d.department)).collect(),
        series: vec![
            BarSeries {
                label: "Retention Rate (%)".to_string(),
                color: PALETTE[0],
                values: scaled(depts, |d| d.retention_rate_pct, 1.0),
            },
            BarSeries {
                label: "Satisfaction Score".to_string(),
                color: PALETTE[1],
                values: scaled(depts, |d| d.satisfaction_score, 10.0),
            },
            BarSeries {
                label: "Training Hours".to_string(),
                color: PALETTE[2],
                values: scaled(depts, |d| d.training_hours_annual, 0.1),
            },
            BarSeries {
                label: "Performance Rating".to_string(),
                color: PALETTE[4],
                values: scaled(depts, |d| d.performance_rating, 20.0),
            },
        ],
    })
}

fn scaled<F>(depts: &[DepartmentPerformance], metric: F, factor: f64) -> Vec<u64>
where
    F: Fn(&DepartmentPerformance) -> Option<f64>,
{
    depts
        .iter()
        .map(|d| bar_value(metric(d).map(|v| v * factor)))
        .collect()
}

fn level<'a>(hr: &'a HrPerformance, name: &str) -> Option<&'a LevelPerformance> {
    hr.level_performance.iter().find(|l| l.employee_level == name)
}

/// Headcount per (department, level) with the level's averages alongside.
pub fn distribution_table(hr: Option<&HrPerformance>) -> Section {
    const TITLE: &str = "Employee Distribution by Department & Level";
    let Some(hr) = hr else {
        return Section::empty(TITLE, NO_DATA);
    };

    let mut table = Table::new(
        TITLE,
        &["Department", "Level", "Count", "Retention", "Satisfaction"],
    );
    for item in &hr.employee_distribution {
        let lvl = level(hr, &item.employee_level);
        table.rows.push(vec![
            strip_company(&item.department),
            item.employee_level.clone(),
            item.count.to_string(),
            format!("{}%", fixed_or(lvl.and_then(|l| l.retention_rate_pct), 1, "N/A")),
            format!("{}/10", fixed_or(lvl.and_then(|l| l.satisfaction_score), 1, "N/A")),
        ]);
    }
    Section::Table(table)
}

pub fn level_table(hr: Option<&HrPerformance>) -> Section {
    const TITLE: &str = "Performance by Employee Level";
    let Some(hr) = hr else {
        return Section::empty(TITLE, NO_DATA);
    };

    let mut table = Table::new(
        TITLE,
        &["Level", "Retention", "Satisfaction", "Training", "Performance"],
    );
    for l in &hr.level_performance {
        table.rows.push(vec![
            l.employee_level.clone(),
            format!("{}%", fixed(l.retention_rate_pct, 1)),
            format!("{}/10", fixed(l.satisfaction_score, 1)),
            format!("{} hrs", fixed(l.training_hours_annual, 0)),
            format!("{}/6.3", fixed(l.performance_rating, 1)),
        ]);
    }
    Section::Table(table)
}
