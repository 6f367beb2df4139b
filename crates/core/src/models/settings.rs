use std::time::Duration;

use crate::errors::DashboardError;

/// Where the FIFO P&L API lives when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:22064/api/FifoPl";

/// Connection settings for [`FifoPlClient`](crate::api::client::FifoPlClient).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    /// Base URL of the transactions resource, without a trailing slash.
    pub base_url: String,

    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientSettings {
    /// Settings for a custom base URL. Must be an absolute http(s) URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, DashboardError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|e| DashboardError::Config(format!("Invalid API URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DashboardError::Config(format!(
                "Invalid API URL '{base_url}': scheme must be http or https"
            )));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            timeout: None,
        })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `GET`/`POST` endpoint for transactions.
    pub fn transactions_url(&self) -> String {
        self.base_url.clone()
    }

    /// `GET` endpoint for the dashboard summary.
    pub fn summary_url(&self) -> String {
        format!("{}/dashboard-summary", self.base_url)
    }
}
