//! Typed response schemas, one per backend endpoint.
//!
//! Every field is optional or defaulted: a partially-shaped payload still
//! decodes, and the views render whatever is present. Lists and names may be
//! `null`; counts may be whole floats. A body that is not a JSON object of the
//! expected shape fails to decode.

use serde::{Deserialize, Serialize};

use super::lenient::{count, null_as_default, opt_count};
use super::types::{Endpoint, Series};

/// A decoded response, tagged by the endpoint it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Overview(OverviewPayload),
    FinancialTrends(FinancialTrends),
    HrPerformance(HrPerformance),
    SecurityDistricts(SecurityDistricts),
    RdPortfolio(RdPortfolio),
    SupplyChainFacilities(SupplyChainFacilities),
    NewsNarrative(NewsNarrative),
}

impl Payload {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Payload::Overview(_) => Endpoint::Overview,
            Payload::FinancialTrends(_) => Endpoint::FinancialTrends,
            Payload::HrPerformance(_) => Endpoint::HrPerformance,
            Payload::SecurityDistricts(_) => Endpoint::SecurityDistricts,
            Payload::RdPortfolio(_) => Endpoint::RdPortfolio,
            Payload::SupplyChainFacilities(_) => Endpoint::SupplyChainFacilities,
            Payload::NewsNarrative(_) => Endpoint::NewsNarrative,
        }
    }
}

impl Endpoint {
    /// Decode a response body into this endpoint's schema.
    pub fn decode(self, body: &[u8]) -> Result<Payload, serde_json::Error> {
        Ok(match self {
            Endpoint::Overview => Payload::Overview(serde_json::from_slice(body)?),
            Endpoint::FinancialTrends => Payload::FinancialTrends(serde_json::from_slice(body)?),
            Endpoint::HrPerformance => Payload::HrPerformance(serde_json::from_slice(body)?),
            Endpoint::SecurityDistricts => Payload::SecurityDistricts(serde_json::from_slice(body)?),
            Endpoint::RdPortfolio => Payload::RdPortfolio(serde_json::from_slice(body)?),
            Endpoint::SupplyChainFacilities => {
                Payload::SupplyChainFacilities(serde_json::from_slice(body)?)
            }
            Endpoint::NewsNarrative => Payload::NewsNarrative(serde_json::from_slice(body)?),
        })
    }
}

// ---------------------------------------------------------------------------
// /api/dashboard/overview
// ---------------------------------------------------------------------------

/// Cross-domain KPI snapshot shown on every page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewPayload {
    pub financial: Option<FinancialKpis>,
    pub hr: Option<HrKpis>,
    pub security: Option<SecurityKpis>,
    pub rd: Option<RdKpis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialKpis {
    pub total_revenue_m: Option<f64>,
    pub total_profit_m: Option<f64>,
    pub profit_margin_pct: Option<f64>,
    pub latest_revenue_m: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HrKpis {
    pub avg_retention_pct: Option<f64>,
    pub avg_satisfaction_score: Option<f64>,
    #[serde(deserialize_with = "opt_count")]
    pub total_employees: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityKpis {
    pub avg_safety_score: Option<f64>,
    #[serde(deserialize_with = "opt_count")]
    pub total_incidents: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RdKpis {
    #[serde(deserialize_with = "opt_count")]
    pub active_projects: Option<u64>,
    pub total_budget_m: Option<f64>,
    pub completion_rate_pct: Option<f64>,
}

// ---------------------------------------------------------------------------
// /api/financial/trends
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialTrends {
    #[serde(deserialize_with = "null_as_default")]
    pub revenue_trends: Vec<Series>,
    #[serde(deserialize_with = "null_as_default")]
    pub profit_trends: Vec<Series>,
    #[serde(deserialize_with = "null_as_default")]
    pub divisions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub periods: Vec<String>,
}

// ---------------------------------------------------------------------------
// /api/hr/performance
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HrPerformance {
    #[serde(deserialize_with = "null_as_default")]
    pub department_performance: Vec<DepartmentPerformance>,
    #[serde(deserialize_with = "null_as_default")]
    pub level_performance: Vec<LevelPerformance>,
    #[serde(deserialize_with = "null_as_default")]
    pub employee_distribution: Vec<EmployeeCount>,
    pub latest_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepartmentPerformance {
    #[serde(rename = "Department")]
    #[serde(deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(rename = "Retention_Rate_Pct")]
    pub retention_rate_pct: Option<f64>,
    #[serde(rename = "Employee_Satisfaction_Score")]
    pub satisfaction_score: Option<f64>,
    #[serde(rename = "Training_Hours_Annual")]
    pub training_hours_annual: Option<f64>,
    #[serde(rename = "Performance_Rating")]
    pub performance_rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelPerformance {
    #[serde(rename = "Employee_Level")]
    #[serde(deserialize_with = "null_as_default")]
    pub employee_level: String,
    #[serde(rename = "Retention_Rate_Pct")]
    pub retention_rate_pct: Option<f64>,
    #[serde(rename = "Employee_Satisfaction_Score")]
    pub satisfaction_score: Option<f64>,
    #[serde(rename = "Training_Hours_Annual")]
    pub training_hours_annual: Option<f64>,
    #[serde(rename = "Performance_Rating")]
    pub performance_rating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeCount {
    #[serde(rename = "Department")]
    #[serde(deserialize_with = "null_as_default")]
    pub department: String,
    #[serde(rename = "Employee_Level")]
    #[serde(deserialize_with = "null_as_default")]
    pub employee_level: String,
    #[serde(deserialize_with = "count")]
    pub count: u64,
}

// ---------------------------------------------------------------------------
// /api/security/districts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityDistricts {
    #[serde(deserialize_with = "null_as_default")]
    pub district_performance: Vec<DistrictPerformance>,
    #[serde(deserialize_with = "null_as_default")]
    pub incidents_trends: Vec<Series>,
    #[serde(deserialize_with = "null_as_default")]
    pub safety_trends: Vec<Series>,
    #[serde(deserialize_with = "null_as_default")]
    pub districts: Vec<String>,
    pub latest_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistrictPerformance {
    #[serde(rename = "District")]
    #[serde(deserialize_with = "null_as_default")]
    pub district: String,
    #[serde(rename = "Security_Incidents")]
    #[serde(deserialize_with = "opt_count")]
    pub security_incidents: Option<u64>,
    #[serde(rename = "Response_Time_Minutes")]
    pub response_time_minutes: Option<f64>,
    #[serde(rename = "Public_Safety_Score")]
    pub public_safety_score: Option<f64>,
    #[serde(rename = "Crime_Prevention_Effectiveness_Pct")]
    pub crime_prevention_pct: Option<f64>,
    #[serde(rename = "Employee_Safety_Index")]
    pub employee_safety_index: Option<f64>,
}

// ---------------------------------------------------------------------------
// /api/rd/portfolio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RdPortfolio {
    #[serde(deserialize_with = "null_as_default")]
    pub portfolio_summary: Vec<DivisionPortfolio>,
    #[serde(deserialize_with = "null_as_default")]
    pub status_distribution: Vec<StatusCount>,
    #[serde(deserialize_with = "null_as_default")]
    pub potential_distribution: Vec<PotentialCount>,
    #[serde(deserialize_with = "null_as_default")]
    pub timeline_data: Vec<DivisionTimeline>,
    #[serde(deserialize_with = "null_as_default")]
    pub security_distribution: Vec<ClassificationCount>,
    #[serde(deserialize_with = "opt_count")]
    pub total_projects: Option<u64>,
    #[serde(deserialize_with = "opt_count")]
    pub active_projects: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DivisionPortfolio {
    #[serde(rename = "Division")]
    #[serde(deserialize_with = "null_as_default")]
    pub division: String,
    #[serde(rename = "Project_Count")]
    #[serde(deserialize_with = "opt_count")]
    pub project_count: Option<u64>,
    #[serde(rename = "Budget_Allocated_M")]
    pub budget_allocated_m: Option<f64>,
    #[serde(rename = "Budget_Spent_M")]
    pub budget_spent_m: Option<f64>,
    #[serde(rename = "High_Potential_Projects")]
    #[serde(deserialize_with = "opt_count")]
    pub high_potential_projects: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCount {
    #[serde(rename = "Status")]
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "count")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotentialCount {
    #[serde(rename = "Commercialization_Potential")]
    #[serde(deserialize_with = "null_as_default")]
    pub potential: String,
    #[serde(deserialize_with = "count")]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DivisionTimeline {
    #[serde(rename = "Division")]
    #[serde(deserialize_with = "null_as_default")]
    pub division: String,
    #[serde(rename = "Timeline_Adherence_Pct")]
    pub timeline_adherence_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationCount {
    #[serde(rename = "Security_Classification")]
    #[serde(deserialize_with = "null_as_default")]
    pub classification: String,
    #[serde(deserialize_with = "count")]
    pub count: u64,
}

// ---------------------------------------------------------------------------
// /api/supply-chain/facilities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyChainFacilities {
    #[serde(deserialize_with = "null_as_default")]
    pub facility_performance: Vec<FacilityPerformance>,
    #[serde(deserialize_with = "null_as_default")]
    pub production_trends: Vec<Series>,
    #[serde(deserialize_with = "null_as_default")]
    pub quality_trends: Vec<Series>,
    #[serde(deserialize_with = "null_as_default")]
    pub facilities: Vec<String>,
    pub latest_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityPerformance {
    #[serde(rename = "Facility_Name")]
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "Facility_Type")]
    pub facility_type: Option<String>,
    #[serde(rename = "Operational_Efficiency_Pct")]
    pub operational_efficiency_pct: Option<f64>,
    #[serde(rename = "Production_Capacity_Units")]
    #[serde(deserialize_with = "opt_count")]
    pub production_capacity_units: Option<u64>,
    #[serde(rename = "Capacity_Utilization_Pct")]
    pub capacity_utilization_pct: Option<f64>,
    #[serde(rename = "Lead_Time_Days")]
    pub lead_time_days: Option<f64>,
    #[serde(rename = "Quality_Score")]
    pub quality_score: Option<f64>,
    #[serde(rename = "Cost_Per_Unit")]
    pub cost_per_unit: Option<f64>,
    #[serde(rename = "Supply_Chain_Disruptions")]
    #[serde(deserialize_with = "opt_count")]
    pub disruptions: Option<u64>,
    #[serde(rename = "Sustainability_Rating")]
    pub sustainability_rating: Option<String>,
    #[serde(rename = "Vendor_Count")]
    #[serde(deserialize_with = "opt_count")]
    pub vendor_count: Option<u64>,
    #[serde(rename = "Inventory_Turnover")]
    pub inventory_turnover: Option<f64>,
    #[serde(rename = "Carbon_Footprint_MT")]
    pub carbon_footprint_mt: Option<f64>,
}

// ---------------------------------------------------------------------------
// /api/news/narrative
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsNarrative {
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub key_points: Vec<String>,
    pub metrics: Option<NarrativeMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeMetrics {
    pub revenue_growth: Option<f64>,
    pub safety_improvement: Option<f64>,
    #[serde(deserialize_with = "opt_count")]
    pub active_projects: Option<u64>,
    #[serde(deserialize_with = "opt_count")]
    pub employee_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn financial_trends_decode_period_keys() {
        let body = br#"{
            "revenue_trends": [{"name": "Wayne Aerospace", "data": [{"period": "2023 Q1", "value": 512.4}]}],
            "profit_trends": [],
            "divisions": ["Wayne Aerospace"]
        }"#;
        let Payload::FinancialTrends(trends) = Endpoint::FinancialTrends.decode(body).unwrap() else {
            panic!("wrong payload variant");
        };
        assert_eq!(trends.revenue_trends[0].data[0].key, "2023 Q1");
        assert_eq!(trends.revenue_trends[0].data[0].value, Some(512.4));
        assert!(trends.periods.is_empty());
    }

    #[test]
    fn security_trends_decode_date_keys() {
        let body = br#"{
            "safety_trends": [{"name": "Downtown", "data": [{"date": "2024-01-31", "value": 7.2}]}],
            "district_performance": [{"District": "Downtown", "Security_Incidents": 12}]
        }"#;
        let Payload::SecurityDistricts(sec) = Endpoint::SecurityDistricts.decode(body).unwrap() else {
            panic!("wrong payload variant");
        };
        assert_eq!(sec.safety_trends[0].data[0].key, "2024-01-31");
        assert_eq!(sec.district_performance[0].security_incidents, Some(12));
        assert_eq!(sec.district_performance[0].public_safety_score, None);
    }

    #[test]
    fn null_value_decodes_as_absent() {
        let body = br#"{"revenue_trends": [{"name": "A", "data": [{"period": "Q1", "value": null}]}]}"#;
        let Payload::FinancialTrends(trends) = Endpoint::FinancialTrends.decode(body).unwrap() else {
            panic!("wrong payload variant");
        };
        assert_eq!(trends.revenue_trends[0].data[0].value_or_zero(), 0.0);
    }

    #[test]
    fn empty_object_decodes_for_every_endpoint() {
        for endpoint in Endpoint::ALL {
            let payload = endpoint.decode(b"{}").unwrap();
            assert_eq!(payload.endpoint(), endpoint);
        }
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(Endpoint::Overview.decode(b"[1, 2, 3]").is_err());
        assert!(Endpoint::NewsNarrative.decode(b"<html>").is_err());
    }

    #[test]
    fn null_lists_and_names_decode_as_empty() {
        let body = br#"{
            "revenue_trends": [{"name": null, "data": [{"period": "2024 Q1", "value": 500.0}]}],
            "profit_trends": null,
            "divisions": null
        }"#;
        let Payload::FinancialTrends(trends) = Endpoint::FinancialTrends.decode(body).unwrap() else {
            panic!("wrong payload variant");
        };
        assert_eq!(trends.revenue_trends[0].name, "");
        assert_eq!(trends.revenue_trends[0].data.len(), 1);
        assert!(trends.profit_trends.is_empty());
        assert!(trends.divisions.is_empty());

        let body = br#"{"safety_trends": [{"name": "Downtown", "data": null}]}"#;
        let Payload::SecurityDistricts(sec) = Endpoint::SecurityDistricts.decode(body).unwrap() else {
            panic!("wrong payload variant");
        };
        assert!(sec.safety_trends[0].data.is_empty());
    }

    #[test]
    fn float_shaped_counts_decode() {
        let body = br#"{
            "district_performance": [{"District": "Downtown", "Security_Incidents": 120.0}]
        }"#;
        let Payload::SecurityDistricts(sec) = Endpoint::SecurityDistricts.decode(body).unwrap() else {
            panic!("wrong payload variant");
        };
        assert_eq!(sec.district_performance[0].security_incidents, Some(120));

        let body = br#"{"hr": {"total_employees": 18250.0}, "rd": {"active_projects": null}}"#;
        let Payload::Overview(overview) = Endpoint::Overview.decode(body).unwrap() else {
            panic!("wrong payload variant");
        };
        assert_eq!(overview.hr.unwrap().total_employees, Some(18250));
        assert_eq!(overview.rd.unwrap().active_projects, None);

        let body = br#"{"status_distribution": [{"Status": "Active", "count": 7.0}]}"#;
        let Payload::RdPortfolio(rd) = Endpoint::RdPortfolio.decode(body).unwrap() else {
            panic!("wrong payload variant");
        };
        assert_eq!(rd.status_distribution[0].count, 7);
    }

    #[test]
    fn overview_decodes_nested_kpis() {
        let body = br#"{
            "financial": {"total_revenue_m": 12345.67, "profit_margin_pct": 18.2},
            "hr": {"total_employees": 420}
        }"#;
        let Payload::Overview(overview) = Endpoint::Overview.decode(body).unwrap() else {
            panic!("wrong payload variant");
        };
        let fin = overview.financial.unwrap();
        assert_eq!(fin.total_revenue_m, Some(12345.67));
        assert_eq!(fin.total_profit_m, None);
        assert_eq!(overview.hr.unwrap().total_employees, Some(420));
        assert!(overview.security.is_none());
    }
}
