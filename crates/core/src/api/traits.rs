use async_trait::async_trait;

use crate::errors::DashboardError;
use crate::models::summary::DashboardSummary;
use crate::models::transaction::Transaction;

/// The FIFO P&L backend as seen by the dashboard.
///
/// [`FifoPlClient`](super::client::FifoPlClient) talks HTTP; tests plug in
/// in-memory implementations. Each call is one round trip: no retries,
/// no caching, no validation.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait FifoPlApi: Send + Sync {
    /// All recorded transactions.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, DashboardError>;

    /// Persist a transaction. The id on the input is ignored; the returned
    /// transaction carries the one the backend assigned.
    async fn add_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Transaction, DashboardError>;

    /// The P&L summary computed over the full history.
    async fn get_dashboard_summary(&self) -> Result<DashboardSummary, DashboardError>;
}
