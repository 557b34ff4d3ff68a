//! Runtime configuration.
//!
//! The backend origin is resolved exactly once at startup and handed to
//! [`crate::data::ApiClient`]. Precedence (highest first):
//!
//! 1. `--api-url` on the command line
//! 2. `BI_API_URL` from the environment (a `.env` file is loaded first)
//! 3. [`DEFAULT_API_URL`]

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "BI_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Backend origin without a trailing slash, e.g. `http://localhost:8000`.
    pub api_base_url: String,
}

impl DashboardConfig {
    /// Resolve the configuration from the CLI override and the environment.
    pub fn resolve(cli_api_url: Option<&str>) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let env_api_url = std::env::var(API_URL_ENV).ok();
        Self::from_sources(cli_api_url, env_api_url.as_deref())
    }

    /// Pick the first non-blank source and validate it.
    pub fn from_sources(cli_api_url: Option<&str>, env_api_url: Option<&str>) -> Result<Self, AppError> {
        let raw = [cli_api_url, env_api_url]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL);

        if !(raw.starts_with("http://") || raw.starts_with("https://")) {
            return Err(AppError::new(
                2,
                format!("Invalid API URL '{raw}': expected an http:// or https:// origin."),
            ));
        }

        Ok(Self {
            api_base_url: raw.trim_end_matches('/').to_string(),
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}
