use crate::errors::DashboardError;
use crate::models::chart::{BarChartConfig, ChartSeries};

/// A drawable surface the hosting page provides (a canvas in a browser,
/// a terminal pane in the CLI, a recorder in tests).
pub trait ChartSurface {
    /// Bind a new, empty bar chart to this surface.
    fn create_bar_chart(
        &mut self,
        config: &BarChartConfig,
    ) -> Result<Box<dyn ChartHandle>, DashboardError>;
}

/// A live chart bound to a surface.
///
/// Chart libraries hold on to canvas contexts that are not released on drop,
/// so the owner must call [`destroy`](ChartHandle::destroy) when done.
pub trait ChartHandle {
    /// Replace the label and data series and redraw.
    fn update(&mut self, series: &ChartSeries) -> Result<(), DashboardError>;

    /// Release the chart and everything bound to the surface.
    fn destroy(self: Box<Self>);
}
