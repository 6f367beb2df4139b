pub mod api;
pub mod errors;
pub mod models;
pub mod render;
pub mod services;
pub mod state;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use api::traits::FifoPlApi;
use errors::DashboardError;
use models::chart::{BarChartConfig, ChartSeries};
use models::form::{FieldError, TransactionForm};
use models::summary::PnlClass;
use models::transaction::Transaction;
use render::environment::RenderEnvironment;
use render::traits::ChartSurface;
use services::chart_service::{ChartAction, ChartLifecycle, ChartService};
use state::{DashboardState, SubmitStart};

/// Result of [`DashboardController::submit_transaction`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Persisted; carries the transaction as echoed by the backend.
    Added(Transaction),
    /// The form has errors; the API was not called.
    Invalid(Vec<FieldError>),
    /// Another submission is still in flight.
    Busy,
    /// The backend call failed; the form keeps its values.
    Failed(DashboardError),
}

/// Main entry point for the dashboard.
/// Holds the view state, the API client and the P&L chart.
///
/// Hosts call the lifecycle methods in order: [`initialize`](Self::initialize),
/// [`after_first_render`](Self::after_first_render), user actions, then
/// [`teardown`](Self::teardown).
#[must_use]
pub struct DashboardController<A: FifoPlApi> {
    api: A,
    state: DashboardState,
    chart: ChartService,
}

impl<A: FifoPlApi> std::fmt::Debug for DashboardController<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("products", &self.state.summary.pnl_by_product.len())
            .field("transactions", &self.state.transactions.len())
            .field("chart", &self.chart)
            .finish()
    }
}

impl<A: FifoPlApi> DashboardController<A> {
    pub fn new(api: A, environment: RenderEnvironment) -> Self {
        Self::with_chart_config(api, environment, BarChartConfig::default())
    }

    pub fn with_chart_config(
        api: A,
        environment: RenderEnvironment,
        config: BarChartConfig,
    ) -> Self {
        Self {
            api,
            state: DashboardState::new(),
            chart: ChartService::with_config(environment, config),
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Load the summary for the first time.
    pub async fn initialize(&mut self) -> Result<(), DashboardError> {
        info!("initializing dashboard");
        self.load_summary().await
    }

    /// Called once the view exists. Creates the chart if a surface is
    /// available and there is something to plot, otherwise defers to the
    /// next summary load.
    pub fn after_first_render(&mut self) -> ChartAction {
        self.chart.create_if_ready(&self.state.summary)
    }

    /// The host laid out its view and now has a surface to draw on.
    pub fn attach_surface(&mut self, surface: Box<dyn ChartSurface>) {
        self.chart.attach_surface(surface);
    }

    /// Release the chart. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.chart.has_chart() {
            info!("tearing down dashboard chart");
        }
        self.chart.destroy();
    }

    // ── Data loading ────────────────────────────────────────────────

    /// Fetch the summary, replace the stored one, then create or update
    /// the chart. On failure the previous summary stays in place.
    pub async fn load_summary(&mut self) -> Result<(), DashboardError> {
        let summary = match self.api.get_dashboard_summary().await {
            Ok(summary) => summary,
            Err(e) => {
                error!(error = %e, "error loading dashboard data");
                return Err(e);
            }
        };

        debug!(
            total_pnl = summary.total_pnl,
            products = summary.pnl_by_product.len(),
            "received dashboard summary"
        );
        if !summary.profitable_count_matches() {
            warn!(
                reported = summary.profitable_products,
                counted = summary.pnl_by_product.count_profitable(),
                "profitable product count disagrees with per-product P&L"
            );
        }

        // State first: the chart reads the summary that was just stored.
        self.state.apply_summary(summary);
        if let ChartAction::Failed(e) = self.chart.render(&self.state.summary) {
            debug!(error = %e, "chart left unchanged after failed render");
        }
        Ok(())
    }

    /// Fetch the transaction history. On failure the previous list stays.
    pub async fn load_transactions(&mut self) -> Result<(), DashboardError> {
        match self.api.list_transactions().await {
            Ok(transactions) => {
                debug!(count = transactions.len(), "received transactions");
                self.state.apply_transactions(transactions);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "error loading transactions");
                Err(e)
            }
        }
    }

    // ── Add transaction ─────────────────────────────────────────────

    /// Validate and send the form. On success the form is reset and the
    /// summary reloaded; on failure the form is left as the user typed it.
    pub async fn submit_transaction(&mut self) -> SubmitOutcome {
        let transaction = match self.state.begin_submit() {
            SubmitStart::Ready(transaction) => transaction,
            SubmitStart::Invalid(errors) => {
                debug!(errors = errors.len(), "transaction form invalid");
                return SubmitOutcome::Invalid(errors);
            }
            SubmitStart::Busy => {
                debug!("submission already in flight");
                return SubmitOutcome::Busy;
            }
        };

        // Released even if this future is dropped before the response arrives.
        let result = {
            let _in_flight = self.state.in_flight();
            self.api.add_transaction(&transaction).await
        };

        match result {
            Ok(created) => {
                info!(
                    id = created.id,
                    product = %created.product,
                    txn_type = %created.txn_type,
                    "transaction added"
                );
                self.state.finish_submit_accepted(created.clone(), Utc::now());
                // A failed reload is already logged and leaves the old summary up.
                let _ = self.load_summary().await;
                SubmitOutcome::Added(created)
            }
            Err(e) => {
                error!(error = %e, "error adding transaction");
                self.state.finish_submit_rejected();
                SubmitOutcome::Failed(e)
            }
        }
    }

    // ── Chart ───────────────────────────────────────────────────────

    /// Push the current summary into the existing chart.
    pub fn update_chart(&mut self) -> ChartAction {
        self.chart.update(&self.state.summary)
    }

    /// The series the chart shows for the current summary.
    pub fn chart_series(&self) -> ChartSeries {
        ChartService::series_for(&self.state.summary)
    }

    #[must_use]
    pub fn chart_lifecycle(&self) -> ChartLifecycle {
        self.chart.lifecycle()
    }

    pub fn chart_config(&self) -> &BarChartConfig {
        self.chart.config()
    }

    // ── View state ──────────────────────────────────────────────────

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Bind point for the form inputs.
    pub fn form_mut(&mut self) -> &mut TransactionForm {
        &mut self.state.form
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn toggle_transaction_form(&mut self) {
        self.state.toggle_transaction_form();
    }

    pub fn toggle_product_pnl(&mut self) {
        self.state.toggle_product_pnl();
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    #[must_use]
    pub fn has_product_data(&self) -> bool {
        self.state.has_product_data()
    }

    pub fn product_names(&self) -> Vec<&str> {
        self.state.product_names()
    }

    pub fn product_pnl_class(&self, pnl: f64) -> PnlClass {
        DashboardState::product_pnl_class(pnl)
    }

    pub fn total_pnl_class(&self) -> PnlClass {
        self.state.total_pnl_class()
    }
}
