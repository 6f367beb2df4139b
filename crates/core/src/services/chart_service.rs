use tracing::{debug, error, info};

use crate::errors::DashboardError;
use crate::models::chart::{BarChartConfig, ChartSeries};
use crate::models::summary::DashboardSummary;
use crate::render::environment::RenderEnvironment;
use crate::render::traits::{ChartHandle, ChartSurface};

/// Where the P&L chart is in its life.
///
/// `Absent → Created → Updated* → Destroyed`. `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartLifecycle {
    Absent,
    Created,
    Updated,
    Destroyed,
}

/// Why a chart operation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Non-rendering environment.
    NotRendering,
    /// Rendering environment, but no surface attached yet.
    NoSurface,
    /// The summary has no products to plot.
    NoProductData,
    /// Update requested before any chart exists.
    NoChart,
    /// The chart was already torn down.
    TornDown,
}

/// Result of a chart operation.
#[derive(Debug)]
pub enum ChartAction {
    Created,
    Updated,
    Skipped(SkipReason),
    Failed(DashboardError),
}

/// Owns the one P&L bar chart and decides when it is created, updated
/// and destroyed.
///
/// The chart only ever grows stale: an empty summary skips updates
/// but never clears an existing chart.
pub struct ChartService {
    environment: RenderEnvironment,
    config: BarChartConfig,
    chart: Option<Box<dyn ChartHandle>>,
    lifecycle: ChartLifecycle,
}

impl ChartService {
    pub fn new(environment: RenderEnvironment) -> Self {
        Self::with_config(environment, BarChartConfig::default())
    }

    pub fn with_config(environment: RenderEnvironment, config: BarChartConfig) -> Self {
        Self {
            environment,
            config,
            chart: None,
            lifecycle: ChartLifecycle::Absent,
        }
    }

    /// Labels and values for the chart, in `pnl_by_product` order.
    pub fn series_for(summary: &DashboardSummary) -> ChartSeries {
        ChartSeries::from(&summary.pnl_by_product)
    }

    #[must_use]
    pub fn lifecycle(&self) -> ChartLifecycle {
        self.lifecycle
    }

    #[must_use]
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    pub fn environment(&self) -> &RenderEnvironment {
        &self.environment
    }

    pub fn attach_surface(&mut self, surface: Box<dyn ChartSurface>) {
        self.environment.attach_surface(surface);
    }

    /// Drawing preconditions shared by every entry point.
    fn precondition(&self, summary: &DashboardSummary) -> Result<(), SkipReason> {
        if self.lifecycle == ChartLifecycle::Destroyed {
            return Err(SkipReason::TornDown);
        }
        if !self.environment.is_rendering() {
            return Err(SkipReason::NotRendering);
        }
        if !self.environment.can_draw() {
            return Err(SkipReason::NoSurface);
        }
        if !summary.has_product_data() {
            return Err(SkipReason::NoProductData);
        }
        Ok(())
    }

    /// First-render hook: create the chart if everything is in place,
    /// otherwise wait for the next summary load.
    pub fn create_if_ready(&mut self, summary: &DashboardSummary) -> ChartAction {
        if let Err(reason) = self.precondition(summary) {
            debug!(?reason, "chart not ready, will retry after data load");
            return ChartAction::Skipped(reason);
        }
        self.create(summary)
    }

    /// After a summary load: update the existing chart or create one.
    pub fn render(&mut self, summary: &DashboardSummary) -> ChartAction {
        if let Err(reason) = self.precondition(summary) {
            debug!(
                ?reason,
                rendering = self.environment.is_rendering(),
                surface = self.environment.can_draw(),
                has_product_data = summary.has_product_data(),
                "skipping chart render"
            );
            return ChartAction::Skipped(reason);
        }
        if self.chart.is_some() {
            debug!("updating existing chart");
            self.update(summary)
        } else {
            self.create(summary)
        }
    }

    fn create(&mut self, summary: &DashboardSummary) -> ChartAction {
        let Some(surface) = self.environment.surface_mut() else {
            error!("chart surface not found");
            return ChartAction::Skipped(SkipReason::NoSurface);
        };

        if let Some(previous) = self.chart.take() {
            info!("destroying previous chart instance");
            previous.destroy();
        }

        info!("creating P&L chart");
        match surface.create_bar_chart(&self.config) {
            Ok(handle) => {
                self.chart = Some(handle);
                self.lifecycle = ChartLifecycle::Created;
                match self.update(summary) {
                    ChartAction::Updated => ChartAction::Created,
                    other => other,
                }
            }
            Err(e) => {
                error!(error = %e, "failed to create chart");
                self.lifecycle = ChartLifecycle::Absent;
                ChartAction::Failed(e)
            }
        }
    }

    /// Push the summary's series into the existing chart and redraw.
    pub fn update(&mut self, summary: &DashboardSummary) -> ChartAction {
        if !self.environment.is_rendering() {
            debug!("not rendering, skipping chart update");
            return ChartAction::Skipped(SkipReason::NotRendering);
        }
        let Some(chart) = self.chart.as_mut() else {
            error!("chart update requested before the chart was created");
            return ChartAction::Skipped(SkipReason::NoChart);
        };

        let series = Self::series_for(summary);
        debug!(products = ?series.labels, values = ?series.data, "updating chart data");

        match chart.update(&series) {
            Ok(()) => {
                self.lifecycle = ChartLifecycle::Updated;
                ChartAction::Updated
            }
            Err(e) => {
                error!(error = %e, "chart update failed");
                ChartAction::Failed(e)
            }
        }
    }

    /// Release the chart. Later render calls are ignored.
    pub fn destroy(&mut self) {
        if let Some(chart) = self.chart.take() {
            info!("destroying chart instance");
            chart.destroy();
        }
        self.lifecycle = ChartLifecycle::Destroyed;
    }
}

impl Drop for ChartService {
    fn drop(&mut self) {
        if let Some(chart) = self.chart.take() {
            chart.destroy();
        }
    }
}

impl std::fmt::Debug for ChartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartService")
            .field("environment", &self.environment)
            .field("lifecycle", &self.lifecycle)
            .field("has_chart", &self.chart.is_some())
            .finish()
    }
}
