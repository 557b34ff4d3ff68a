//! Executive summary cards shared by the overview and news pages.

use crate::domain::OverviewPayload;

use super::fmt::{count_opt, plain_opt, thousands_opt};
use super::{Accent, MetricCard};

pub fn executive_cards(overview: Option<&OverviewPayload>) -> Vec<MetricCard> {
    let o = overview.cloned().unwrap_or_default();
    let fin = o.financial.unwrap_or_default();
    let hr = o.hr.unwrap_or_default();
    let sec = o.security.unwrap_or_default();
    let rd = o.rd.unwrap_or_default();

    vec![
        MetricCard::new(
            "Total Revenue",
            format!("${}M", thousands_opt(fin.total_revenue_m)),
            format!("{}% margin", plain_opt(fin.profit_margin_pct)),
            Accent::Wayne,
        ),
        MetricCard::new(
            "Employee Satisfaction",
            format!("{}/10", plain_opt(hr.avg_satisfaction_score)),
            format!("{}% retention", plain_opt(hr.avg_retention_pct)),
            Accent::Green,
        ),
        MetricCard::new(
            "Public Safety Score",
            format!("{}/10", plain_opt(sec.avg_safety_score)),
            format!("{} incidents", count_opt(sec.total_incidents)),
            Accent::Blue,
        ),
        MetricCard::new(
            "Active R&D Projects",
            count_opt(rd.active_projects),
            format!("${}M budget", thousands_opt(rd.total_budget_m)),
            Accent::Purple,
        ),
    ]
}
