//! Page loading: fetch every endpoint a page needs, in parallel, and join.
//!
//! All requests are issued together and the loader waits for all of them.
//! If any request fails, the failure is logged and the whole page is treated
//! as having no data; callers never see a partially-loaded page.

use std::time::Instant;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{error, info, warn};

use crate::domain::{
    Endpoint, FinancialTrends, HrPerformance, NewsNarrative, OverviewPayload, Page, Payload,
    RdPortfolio, SecurityDistricts, SupplyChainFacilities,
};
use crate::error::FetchError;

use super::client::PayloadSource;

/// Payloads available to a page's views. `None` means "nothing to display".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageData {
    pub overview: Option<OverviewPayload>,
    pub financial: Option<FinancialTrends>,
    pub hr: Option<HrPerformance>,
    pub security: Option<SecurityDistricts>,
    pub rd: Option<RdPortfolio>,
    pub supply_chain: Option<SupplyChainFacilities>,
    pub news: Option<NewsNarrative>,
}

impl PageData {
    pub fn insert(&mut self, payload: Payload) {
        match payload {
            Payload::Overview(p) => self.overview = Some(p),
            Payload::FinancialTrends(p) => self.financial = Some(p),
            Payload::HrPerformance(p) => self.hr = Some(p),
            Payload::SecurityDistricts(p) => self.security = Some(p),
            Payload::RdPortfolio(p) => self.rd = Some(p),
            Payload::SupplyChainFacilities(p) => self.supply_chain = Some(p),
            Payload::NewsNarrative(p) => self.news = Some(p),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == PageData::default()
    }
}

/// Load everything `page` needs.
pub fn load_page<S: PayloadSource>(source: &S, page: Page) -> PageData {
    let started = Instant::now();
    let data = load_endpoints(source, page.endpoints());
    info!(
        page = page.display_name(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        empty = data.is_empty(),
        "page loaded"
    );
    data
}

/// Fetch `endpoints` concurrently; all-or-nothing.
pub fn load_endpoints<S: PayloadSource>(source: &S, endpoints: &[Endpoint]) -> PageData {
    let results = fetch_all(source, endpoints);

    let mut data = PageData::default();
    let mut failed = false;
    for result in results {
        match result {
            Ok(payload) => data.insert(payload),
            Err(err) => {
                error!(url = err.url(), error = %err, "error fetching dashboard data");
                failed = true;
            }
        }
    }

    if failed { PageData::default() } else { data }
}

/// One worker per endpoint so every request is in flight at once, whatever
/// the size of rayon's global pool.
fn fetch_all<S: PayloadSource>(source: &S, endpoints: &[Endpoint]) -> Vec<Result<Payload, FetchError>> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(endpoints.len().max(1))
        .thread_name(|i| format!("bi-fetch-{i}"))
        .build();
    match pool {
        Ok(pool) => pool.install(|| fetch_each(source, endpoints)),
        Err(err) => {
            warn!(error = %err, "fetch pool unavailable; using the global pool");
            fetch_each(source, endpoints)
        }
    }
}

fn fetch_each<S: PayloadSource>(source: &S, endpoints: &[Endpoint]) -> Vec<Result<Payload, FetchError>> {
    endpoints
        .par_iter()
        .map(|&endpoint| source.fetch(endpoint))
        .collect()
}
