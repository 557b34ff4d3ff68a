//! Supply chain page.

use crate::domain::{FacilityPerformance, SeriesGroup, SupplyChainFacilities};
use crate::pivot::{pivot, series_then_group};

use super::fmt::{count_opt, fixed, month_label, thousands};
use super::{Accent, LineChart, MetricCard, Section, Table, trend_lines};

const CHART_TITLE: &str = "Facility Performance Analysis";
const NO_DATA: &str = "No supply chain data available";

/// Cards derived from the facility list. Averages divide by at least 1 so an
/// empty list yields zeros; sums start from `0.0` since an empty `f64` sum is
/// `-0.0`.
pub fn cards(supply: Option<&SupplyChainFacilities>) -> Vec<MetricCard> {
    let facilities: &[FacilityPerformance] =
        supply.map(|s| s.facility_performance.as_slice()).unwrap_or(&[]);
    let divisor = facilities.len().max(1) as f64;

    let efficiency = facilities
        .iter()
        .fold(0.0, |acc, f| acc + f.operational_efficiency_pct.unwrap_or(0.0))
        / divisor;
    let capacity: u64 = facilities
        .iter()
        .map(|f| f.production_capacity_units.unwrap_or(0))
        .sum();
    let lead_time = facilities
        .iter()
        .fold(0.0, |acc, f| acc + f.lead_time_days.unwrap_or(0.0))
        / divisor;

    vec![
        MetricCard::new(
            "Total Facilities",
            facilities.len().to_string(),
            "Active Locations",
            Accent::Wayne,
        ),
        MetricCard::new(
            "Avg Efficiency",
            format!("{efficiency:.2}%"),
            "Operational Efficiency",
            Accent::Green,
        ),
        MetricCard::new(
            "Total Capacity",
            format!("{} units", thousands(capacity as f64)),
            "Production Capacity",
            Accent::Blue,
        ),
        MetricCard::new(
            "Avg Lead Time",
            format!("{lead_time:.1} days"),
            "Order to Delivery",
            Accent::Purple,
        ),
    ]
}

/// Production (solid) and quality (dashed) per facility, keyed by month.
pub fn trend_chart(supply: Option<&SupplyChainFacilities>) -> Section {
    let Some(supply) = supply else {
        return Section::empty(CHART_TITLE, NO_DATA);
    };

    let groups = [
        SeriesGroup::new("Production", &supply.production_trends),
        SeriesGroup::new("Quality", &supply.quality_trends),
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

/// Efficiency band shown next to each facility.
pub fn efficiency_band(pct: Option<f64>) -> &'static str {
    match pct {
        Some(p) if p >= 85.0 => "High",
        Some(p) if p >= 70.0 => "Medium",
        _ => "Low",
    }
}

pub fn facility_table(supply: Option<&SupplyChainFacilities>) -> Section {
    const TITLE: &str = "Facility Performance Summary";
    let Some(supply) = supply else {
        return Section::empty(TITLE, NO_DATA);
    };

    let mut table = Table::new(
        TITLE,
        &[
            "Facility",
            "Type",
            "Efficiency %",
            "Capacity",
            "Utilization %",
            "Lead Time",
            "Quality",
            "Band",
        ],
    );
    for f in &supply.facility_performance {
        table.rows.push(vec![
            f.name.clone(),
            f.facility_type.clone().unwrap_or_else(|| "-".to_string()),
            format!("{}%", fixed(f.operational_efficiency_pct, 1)),
            count_opt(f.production_capacity_units),
            format!("{}%", fixed(f.capacity_utilization_pct, 1)),
            format!("{} days", fixed(f.lead_time_days, 1)),
            format!("{}/10", fixed(f.quality_score, 1)),
            efficiency_band(f.operational_efficiency_pct).to_string(),
        ]);
    }
    Section::Table(table)
}
