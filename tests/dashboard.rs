//! End-to-end page loading against a local HTTP backend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;

use tiny_http::{Header, Response, Server};
use wayne_bi::config::DashboardConfig;
use wayne_bi::data::{ApiClient, load_page};
use wayne_bi::domain::{Endpoint, ExportFormat, Page};
use wayne_bi::report::render_page;
use wayne_bi::views::{self, Section, TrendChart};

const OVERVIEW: &str = r#"{
    "financial": {"total_revenue_m": 45210.5, "total_profit_m": 8120.25, "profit_margin_pct": 17.96, "latest_revenue_m": 3890.1},
    "hr": {"avg_retention_pct": 91.4, "avg_satisfaction_score": 7.8, "total_employees": 18250},
    "security": {"avg_safety_score": 7.6, "total_incidents": 1432},
    "rd": {"active_projects": 42, "total_budget_m": 2875.0, "completion_rate_pct": 68.5}
}"#;

const FINANCIAL: &str = r#"{
    "revenue_trends": [
        {"name": "Wayne Aerospace", "data": [{"period": "2024 Q1", "value": 500.0}, {"period": "2024 Q2", "value": 520.0}]},
        {"name": "Wayne Biotech", "data": [{"period": "2024 Q1", "value": 300.0}]}
    ],
    "profit_trends": [
        {"name": "Wayne Aerospace", "data": [{"period": "2024 Q1", "value": 50.0}, {"period": "2024 Q2", "value": 65.0}]},
        {"name": "Wayne Biotech", "data": [{"period": "2024 Q2", "value": 40.0}]}
    ],
    "divisions": ["Wayne Aerospace", "Wayne Biotech"],
    "periods": ["2024 Q1", "2024 Q2"]
}"#;

const SECURITY: &str = r#"{
    "district_performance": [
        {"District": "Downtown", "Security_Incidents": 120, "Response_Time_Minutes": 2.5, "Public_Safety_Score": 7.9,
         "Crime_Prevention_Effectiveness_Pct": 81.2, "Employee_Safety_Index": 8.4}
    ],
    "safety_trends": [{"name": "Downtown", "data": [{"date": "2024-01-31", "value": 7.1}, {"date": "2024-02-29", "value": 7.9}]}],
    "incidents_trends": [{"name": "Downtown", "data": [{"date": "2024-02-29", "value": 11}]}],
    "districts": ["Downtown"],
    "latest_date": "2024-02-29"
}"#;

/// Local backend serving canned bodies by path; unknown paths get a 404.
struct Backend {
    url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

impl Backend {
    fn start(routes: &[(Endpoint, u16, &str)]) -> Self {
        let server = Server::http("127.0.0.1:0").expect("bind test server");
        let addr = server.server_addr().to_ip().expect("tcp listener");
        let routes: HashMap<String, (u16, String)> = routes
            .iter()
            .map(|(e, status, body)| (e.path().to_string(), (*status, body.to_string())))
            .collect();
        let hits = Arc::new(Mutex::new(Vec::new()));

        let log = hits.clone();
        thread::spawn(move || {
            for request in server.incoming_requests() {
                let path = request.url().to_string();
                log.lock().unwrap().push(path.clone());
                let (status, body) = routes
                    .get(&path)
                    .cloned()
                    .unwrap_or((404, r#"{"detail": "Not Found"}"#.to_string()));
                let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                let response = Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            url: format!("http://{addr}"),
            hits,
        }
    }

    fn client(&self) -> ApiClient {
        let config = DashboardConfig::from_sources(Some(&self.url), None).unwrap();
        ApiClient::new(&config)
    }

    fn hits(&self) -> Vec<String> {
        let mut hits = self.hits.lock().unwrap().clone();
        hits.sort();
        hits
    }
}

#[test]
fn financial_page_pivots_trends() {
    let backend = Backend::start(&[
        (Endpoint::Overview, 200, OVERVIEW),
        (Endpoint::FinancialTrends, 200, FINANCIAL),
    ]);

    let data = load_page(&backend.client(), Page::Financial);
    assert!(data.overview.is_some());
    assert!(data.hr.is_none());

    let view = views::build(Page::Financial, &data);
    let Section::Line(chart) = &view.sections[1] else {
        panic!("expected the trend chart");
    };
    assert_eq!(chart.rows.len(), 2);
    assert_eq!(chart.rows[0].get("Wayne Biotech Profit"), Some(0.0));
    assert_eq!(chart.rows[1].get("Wayne Biotech Profit"), Some(40.0));
    assert_eq!(chart.rows[1].get("Wayne Biotech Revenue"), Some(0.0));

    let text = render_page(&view, None);
    assert!(text.contains("$45,210.5M"));
    assert!(text.contains("17.96% margin"));
    assert!(text.contains("12.5%"));

    assert_eq!(
        backend.hits(),
        ["/api/dashboard/overview", "/api/financial/trends"]
    );
}

#[test]
fn one_failed_request_empties_the_page() {
    let backend = Backend::start(&[
        (Endpoint::Overview, 200, OVERVIEW),
        (Endpoint::SecurityDistricts, 500, r#"{"detail": "Internal Server Error"}"#),
    ]);

    let data = load_page(&backend.client(), Page::Security);
    assert!(data.is_empty());

    let view = views::build(Page::Security, &data);
    assert!(matches!(view.sections[1], Section::Empty { .. }));
    let text = render_page(&view, None);
    assert!(text.contains("(No security data available)"));
}

#[test]
fn malformed_body_counts_as_failure() {
    let backend = Backend::start(&[
        (Endpoint::Overview, 200, OVERVIEW),
        (Endpoint::NewsNarrative, 200, "<html>oops</html>"),
    ]);
    assert!(load_page(&backend.client(), Page::News).is_empty());
}

#[test]
fn overview_requests_every_endpoint() {
    let backend = Backend::start(&[(Endpoint::Overview, 200, OVERVIEW)]);
    let data = load_page(&backend.client(), Page::Overview);

    // Six of seven endpoints 404 here.
    assert!(data.is_empty());
    let mut expected: Vec<String> = Endpoint::ALL.iter().map(|e| e.path().to_string()).collect();
    expected.sort();
    assert_eq!(backend.hits(), expected);
}

#[test]
fn unreachable_backend_is_empty_not_an_error() {
    let config = DashboardConfig::from_sources(Some("http://127.0.0.1:1"), None).unwrap();
    let data = load_page(&ApiClient::new(&config), Page::Hr);
    assert!(data.is_empty());
}

#[test]
fn security_chart_exports_month_labels() {
    let backend = Backend::start(&[
        (Endpoint::Overview, 200, OVERVIEW),
        (Endpoint::SecurityDistricts, 200, SECURITY),
    ]);
    let data = load_page(&backend.client(), TrendChart::Security.page());
    let chart = TrendChart::Security.build(&data).expect("security chart");

    let path = std::env::temp_dir().join(format!("bi-security-{}.json", std::process::id()));
    wayne_bi::io::write_chart(&path, &chart, ExportFormat::Json).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let v: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v["key"], "date");
    assert_eq!(v["rows"][0]["date"], "Jan 24");
    assert_eq!(v["rows"][0]["Downtown Incidents"], 0.0);
    assert_eq!(v["rows"][1]["Downtown Incidents"], 11.0);
    assert_eq!(v["series"][0], "Downtown Safety");
}

#[test]
fn null_lists_and_float_counts_keep_the_page() {
    let security = r#"{
        "district_performance": [{"District": "Downtown", "Security_Incidents": 120.0, "Public_Safety_Score": 7.9}],
        "safety_trends": [{"name": "Downtown", "data": [{"date": "2024-01-31", "value": 7.1}]}],
        "incidents_trends": null,
        "districts": null
    }"#;
    let overview = r#"{"hr": {"total_employees": 18250.0}, "security": {"total_incidents": 1432.0}}"#;
    let backend = Backend::start(&[
        (Endpoint::Overview, 200, overview),
        (Endpoint::SecurityDistricts, 200, security),
    ]);

    let data = load_page(&backend.client(), Page::Security);
    assert!(!data.is_empty());

    let text = render_page(&views::build(Page::Security, &data), None);
    assert!(text.contains("1,432"));
    assert!(text.contains("Downtown"));
    assert!(!text.contains("No security data available"));
}
