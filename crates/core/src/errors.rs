use thiserror::Error;

/// Unified error type for the dashboard core.
/// Every fallible public function returns `Result<T, DashboardError>`.
#[derive(Debug, Error)]
pub enum DashboardError {
    // ── API / Network ───────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {endpoint}")]
    Http { status: u16, endpoint: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Dashboard ───────────────────────────────────────────────────
    #[error("Chart error: {0}")]
    Chart(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DashboardError {
    /// True for failures that happened on the wire (transport or non-2xx status).
    pub fn is_transport(&self) -> bool {
        matches!(self, DashboardError::Network(_) | DashboardError::Http { .. })
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return DashboardError::Deserialization(e.to_string());
        }
        if let Some(status) = e.status() {
            return DashboardError::Http {
                status: status.as_u16(),
                endpoint: e
                    .url()
                    .map(|u| u.path().to_string())
                    .unwrap_or_default(),
            };
        }
        // Query strings never belong in logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        DashboardError::Network(sanitized)
    }
}
