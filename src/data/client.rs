//! Blocking HTTP client for the metrics backend.

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::domain::{Endpoint, Payload};
use crate::error::FetchError;

/// Anything that can produce a decoded payload for an endpoint.
///
/// [`ApiClient`] is the real implementation; the page loader only depends on
/// this trait so it can be driven by canned payloads.
pub trait PayloadSource: Sync {
    fn fetch(&self, endpoint: Endpoint) -> Result<Payload, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

impl PayloadSource for ApiClient {
    fn fetch(&self, endpoint: Endpoint) -> Result<Payload, FetchError> {
        let url = self.url(endpoint);
        debug!(%url, "fetching");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().map_err(|source| FetchError::Transport {
            url: url.clone(),
            source,
        })?;

        let payload = endpoint
            .decode(&body)
            .map_err(|source| FetchError::Decode {
                url: url.clone(),
                source,
            })?;

        debug!(%url, bytes = body.len(), "fetched");
        Ok(payload)
    }
}
