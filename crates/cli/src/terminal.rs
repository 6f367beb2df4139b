use fifo_pl_dashboard_core::errors::DashboardError;
use fifo_pl_dashboard_core::models::chart::{BarChartConfig, ChartSeries};
use fifo_pl_dashboard_core::models::summary::PnlClass;
use fifo_pl_dashboard_core::render::traits::{ChartHandle, ChartSurface};

const BAR_WIDTH: usize = 40;

/// Draws the P&L chart as horizontal text bars on stdout.
pub struct TerminalSurface {
    width: usize,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self { width: BAR_WIDTH }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartSurface for TerminalSurface {
    fn create_bar_chart(
        &mut self,
        config: &BarChartConfig,
    ) -> Result<Box<dyn ChartHandle>, DashboardError> {
        if self.width == 0 {
            return Err(DashboardError::Chart("terminal surface has zero width".into()));
        }
        Ok(Box::new(TerminalChart {
            config: config.clone(),
            width: self.width,
        }))
    }
}

struct TerminalChart {
    config: BarChartConfig,
    width: usize,
}

impl ChartHandle for TerminalChart {
    fn update(&mut self, series: &ChartSeries) -> Result<(), DashboardError> {
        println!("{}", render_bars(&self.config, series, self.width));
        Ok(())
    }

    fn destroy(self: Box<Self>) {
        tracing::debug!("terminal chart released");
    }
}

/// Text rendering of the series: one row per product, bar length
/// proportional to |P&L|, `+` bars for profit and `-` bars for loss.
pub fn render_bars(config: &BarChartConfig, series: &ChartSeries, width: usize) -> String {
    let label_width = series.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let max_abs = series.data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));

    let mut out = format!("{} by {}\n", config.y_axis_title, config.x_axis_title);
    for (label, value) in series.points() {
        let len = if max_abs > 0.0 {
            ((value.abs() / max_abs) * width as f64).round() as usize
        } else {
            0
        };
        let glyph = match PnlClass::of(value) {
            PnlClass::Profit => '+',
            PnlClass::Loss => '-',
        };
        let bar: String = std::iter::repeat(glyph).take(len).collect();
        out.push_str(&format!(
            "{label:<label_width$} | {bar:<width$} {}\n",
            config.tooltip_label(value)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_bar_is_full_width() {
        let series = ChartSeries {
            labels: vec!["Widget".into(), "Gadget".into()],
            data: vec![150.5, -25.0],
        };
        let text = render_bars(&BarChartConfig::default(), &series, 10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Profit/Loss ($) by Products");
        assert!(lines[1].starts_with("Widget | ++++++++++ "));
        assert!(lines[1].ends_with("Profit/Loss: $150.50"));
        assert!(lines[2].starts_with("Gadget | --"));
        assert!(lines[2].ends_with("Profit/Loss: $-25.00"));
    }

    #[test]
    fn all_zero_values_draw_no_bars() {
        let series = ChartSeries {
            labels: vec!["Flat".into()],
            data: vec![0.0],
        };
        let text = render_bars(&BarChartConfig::default(), &series, 10);
        assert!(!text.contains('+'));
    }
}
