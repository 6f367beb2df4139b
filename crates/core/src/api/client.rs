use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::traits::FifoPlApi;
use crate::errors::DashboardError;
use crate::models::settings::ClientSettings;
use crate::models::summary::DashboardSummary;
use crate::models::transaction::Transaction;

/// HTTP client for the FIFO P&L REST API.
///
/// - `GET  {base}`                   → all transactions
/// - `POST {base}`                   → create a transaction
/// - `GET  {base}/dashboard-summary` → computed summary
///
/// Non-2xx responses surface as [`DashboardError::Http`].
pub struct FifoPlClient {
    client: Client,
    settings: ClientSettings,
}

impl FifoPlClient {
    pub fn new(settings: ClientSettings) -> Result<Self, DashboardError> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match settings.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        let client = builder
            .build()
            .map_err(|e| DashboardError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }
}

impl Default for FifoPlClient {
    fn default() -> Self {
        Self {
            client: Client::new(),
            settings: ClientSettings::default(),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl FifoPlApi for FifoPlClient {
    async fn list_transactions(&self) -> Result<Vec<Transaction>, DashboardError> {
        let url = self.settings.transactions_url();
        debug!(%url, "fetching transactions");

        let transactions = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Transaction>>()
            .await?;
        Ok(transactions)
    }

    async fn add_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Transaction, DashboardError> {
        let url = self.settings.transactions_url();
        debug!(
            %url,
            product = %transaction.product,
            txn_type = %transaction.txn_type,
            "posting transaction"
        );

        let created = self
            .client
            .post(&url)
            .json(transaction)
            .send()
            .await?
            .error_for_status()?
            .json::<Transaction>()
            .await?;
        Ok(created)
    }

    async fn get_dashboard_summary(&self) -> Result<DashboardSummary, DashboardError> {
        let url = self.settings.summary_url();
        debug!(%url, "fetching dashboard summary");

        let summary = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<DashboardSummary>()
            .await?;
        Ok(summary)
    }
}
