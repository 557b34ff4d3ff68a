//! News page: the generated narrative and overview-derived insights.

use crate::domain::{NewsNarrative, OverviewPayload};

use super::fmt::{count_opt, plain_opt, thousands_opt};
use super::{NarrativeView, Section};

pub fn narrative(news: Option<&NewsNarrative>) -> Section {
    let Some(news) = news else {
        return Section::empty("Business Intelligence Report", "No narrative data available");
    };

    let m = news.metrics.clone().unwrap_or_default();
    Section::Narrative(NarrativeView {
        headline: news.headline.clone().unwrap_or_default(),
        subheadline: news.subheadline.clone().unwrap_or_default(),
        key_points: news.key_points.clone(),
        metrics: vec![
            ("Revenue Growth".to_string(), format!("{}%", plain_opt(m.revenue_growth))),
            ("Safety Improvement".to_string(), plain_opt(m.safety_improvement)),
            ("Active Projects".to_string(), count_opt(m.active_projects)),
            ("Employees".to_string(), count_opt(m.employee_count)),
        ],
    })
}

/// One bullet per headline KPI from the overview payload.
pub fn insights(overview: Option<&OverviewPayload>) -> Section {
    const TITLE: &str = "Key Strategic Insights";
    let Some(overview) = overview else {
        return Section::empty(TITLE, "No overview data available");
    };

    let fin = overview.financial.clone().unwrap_or_default();
    let hr = overview.hr.clone().unwrap_or_default();
    let sec = overview.security.clone().unwrap_or_default();
    let rd = overview.rd.clone().unwrap_or_default();

    Section::Bullets {
        title: TITLE.to_string(),
        items: vec![
            format!("Total revenue of ${}M", thousands_opt(fin.total_revenue_m)),
            format!("Profit margin of {}%", plain_opt(fin.profit_margin_pct)),
            format!("Employee satisfaction score of {}/10", plain_opt(hr.avg_satisfaction_score)),
            format!("Retention rate of {}%", plain_opt(hr.avg_retention_pct)),
            format!("Public safety score of {}/10", plain_opt(sec.avg_safety_score)),
            format!("{} total incidents managed", count_opt(sec.total_incidents)),
            format!(
                "{} active R&D projects with ${}M budget allocation",
                count_opt(rd.active_projects),
                thousands_opt(rd.total_budget_m)
            ),
            format!("R&D completion rate of {}%", plain_opt(rd.completion_rate_pct)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FinancialKpis, NarrativeMetrics};

    #[test]
    fn narrative_formats_metrics() {
        let news = NewsNarrative {
            headline: Some("Wayne Enterprises Posts Record Quarter".to_string()),
            subheadline: None,
            key_points: vec!["Revenue up".to_string()],
            metrics: Some(NarrativeMetrics {
                revenue_growth: Some(12.4),
                safety_improvement: Some(0.8),
                active_projects: Some(42),
                employee_count: Some(18_250),
            }),
        };
        let Section::Narrative(view) = narrative(Some(&news)) else {
            panic!("expected narrative");
        };
        assert_eq!(view.subheadline, "");
        assert_eq!(view.metrics[0].1, "12.4%");
        assert_eq!(view.metrics[1].1, "0.8");
        assert_eq!(view.metrics[3].1, "18,250");
    }

    #[test]
    fn narrative_without_metrics_uses_placeholders() {
        let Section::Narrative(view) = narrative(Some(&NewsNarrative::default())) else {
            panic!("expected narrative");
        };
        assert_eq!(view.metrics[0].1, "-%");
        assert_eq!(view.metrics[2].1, "-");
    }

    #[test]
    fn insights_need_overview() {
        assert!(matches!(insights(None), Section::Empty { .. }));

        let overview = OverviewPayload {
            financial: Some(FinancialKpis {
                total_revenue_m: Some(45000.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let Section::Bullets { items, .. } = insights(Some(&overview)) else {
            panic!("expected bullets");
        };
        assert_eq!(items[0], "Total revenue of $45,000M");
    }
}
