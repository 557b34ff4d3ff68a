//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - decoded straight from backend responses
//! - reshaped for charts and tables
//! - exported to JSON/CSV

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::lenient::null_as_default;

/// A dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Overview,
    Financial,
    Hr,
    Security,
    Rd,
    SupplyChain,
    News,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Overview,
        Page::Financial,
        Page::Hr,
        Page::Security,
        Page::Rd,
        Page::SupplyChain,
        Page::News,
    ];

    /// Tab / heading label.
    pub fn display_name(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Financial => "Financial",
            Page::Hr => "HR",
            Page::Security => "Security",
            Page::Rd => "R&D",
            Page::SupplyChain => "Supply Chain",
            Page::News => "News",
        }
    }

    /// Page heading and one-line description.
    pub fn heading(self) -> (&'static str, &'static str) {
        match self {
            Page::Overview => (
                "Executive Overview",
                "Comprehensive business intelligence summary for Wayne Enterprises",
            ),
            Page::Financial => (
                "Financial Performance",
                "Revenue, profit, and financial trends across all divisions",
            ),
            Page::Hr => (
                "HR Analytics",
                "Employee performance, satisfaction, and retention metrics",
            ),
            Page::Security => (
                "Security Operations",
                "Public safety, incident trends, and district performance",
            ),
            Page::Rd => (
                "R&D Portfolio",
                "Research projects, budgets, and commercialization potential",
            ),
            Page::SupplyChain => (
                "Supply Chain",
                "Facility performance, production volume, and quality trends",
            ),
            Page::News => (
                "Business Intelligence Report",
                "Executive summary and strategic insights for Wayne Enterprises",
            ),
        }
    }

    /// Endpoints the page needs, fetched together.
    pub fn endpoints(self) -> &'static [Endpoint] {
        match self {
            Page::Overview => &Endpoint::ALL,
            Page::Financial => &[Endpoint::Overview, Endpoint::FinancialTrends],
            Page::Hr => &[Endpoint::Overview, Endpoint::HrPerformance],
            Page::Security => &[Endpoint::Overview, Endpoint::SecurityDistricts],
            Page::Rd => &[Endpoint::Overview, Endpoint::RdPortfolio],
            Page::SupplyChain => &[Endpoint::Overview, Endpoint::SupplyChainFacilities],
            Page::News => &[Endpoint::Overview, Endpoint::NewsNarrative],
        }
    }

    pub fn next(self) -> Page {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Page {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Backend endpoints consumed by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Overview,
    FinancialTrends,
    HrPerformance,
    SecurityDistricts,
    RdPortfolio,
    SupplyChainFacilities,
    NewsNarrative,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Overview,
        Endpoint::FinancialTrends,
        Endpoint::HrPerformance,
        Endpoint::SecurityDistricts,
        Endpoint::RdPortfolio,
        Endpoint::SupplyChainFacilities,
        Endpoint::NewsNarrative,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Overview => "/api/dashboard/overview",
            Endpoint::FinancialTrends => "/api/financial/trends",
            Endpoint::HrPerformance => "/api/hr/performance",
            Endpoint::SecurityDistricts => "/api/security/districts",
            Endpoint::RdPortfolio => "/api/rd/portfolio",
            Endpoint::SupplyChainFacilities => "/api/supply-chain/facilities",
            Endpoint::NewsNarrative => "/api/news/narrative",
        }
    }
}

/// Output format for `bi export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// One `(time key, value)` observation of a series.
///
/// The backend labels the key `period` for quarterly series and `date` for
/// daily/monthly ones; both decode into `key`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(
        default,
        alias = "period",
        alias = "date",
        deserialize_with = "null_as_default"
    )]
    pub key: String,
    #[serde(default)]
    pub value: Option<f64>,
}

impl DataPoint {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
        }
    }

    /// Numeric value; absent or NaN counts as zero.
    pub fn value_or_zero(&self) -> f64 {
        match self.value {
            Some(v) if !v.is_nan() => v,
            _ => 0.0,
        }
    }
}

/// A named, ordered sequence of observations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<DataPoint>,
}

impl Series {
    pub fn new(name: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Value of the first point with the given key.
    pub fn value_at(&self, key: &str) -> Option<f64> {
        self.data
            .iter()
            .find(|p| p.key == key)
            .map(DataPoint::value_or_zero)
    }
}

/// Series sharing one metric role (e.g. revenue), pivoted together.
#[derive(Debug, Clone, Copy)]
pub struct SeriesGroup<'a> {
    pub label: &'a str,
    pub series: &'a [Series],
}

impl<'a> SeriesGroup<'a> {
    pub fn new(label: &'a str, series: &'a [Series]) -> Self {
        Self { label, series }
    }
}

/// One row of a pivoted table: a time key plus one column per series label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotedRow {
    pub key: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl PivotedRow {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.values.get(label).copied()
    }
}
