use serde::{Deserialize, Serialize};

use super::summary::{PnlByProduct, PnlClass};

/// Labels and values for the P&L bar chart.
///
/// `labels[i]` is the product whose P&L is `data[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ChartSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Iterate `(label, value)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.data.iter().copied())
    }
}

impl From<&PnlByProduct> for ChartSeries {
    fn from(pnl: &PnlByProduct) -> Self {
        let (labels, data) = pnl.iter().map(|(p, v)| (p.to_string(), v)).unzip();
        Self { labels, data }
    }
}

/// An RGBA colour as used by canvas chart libraries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// CSS notation, e.g. `rgba(75, 192, 192, 0.6)`.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Fill and border colour of one bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarStyle {
    pub fill: Rgba,
    pub border: Rgba,
}

const PROFIT_FILL: Rgba = Rgba::new(75, 192, 192, 0.6);
const PROFIT_BORDER: Rgba = Rgba::new(75, 192, 192, 1.0);
const LOSS_FILL: Rgba = Rgba::new(255, 99, 132, 0.6);
const LOSS_BORDER: Rgba = Rgba::new(255, 99, 132, 1.0);

/// Static configuration of the P&L bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartConfig {
    pub dataset_label: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub border_width: u32,
    pub show_legend: bool,
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            dataset_label: "Profit/Loss".to_string(),
            x_axis_title: "Products".to_string(),
            y_axis_title: "Profit/Loss ($)".to_string(),
            border_width: 1,
            show_legend: false,
            responsive: true,
            maintain_aspect_ratio: false,
        }
    }
}

impl BarChartConfig {
    /// Colour of a bar: teal for profit (including zero), red for loss.
    pub fn bar_style(&self, value: f64) -> BarStyle {
        match PnlClass::of(value) {
            PnlClass::Profit => BarStyle {
                fill: PROFIT_FILL,
                border: PROFIT_BORDER,
            },
            PnlClass::Loss => BarStyle {
                fill: LOSS_FILL,
                border: LOSS_BORDER,
            },
        }
    }

    /// Tooltip text for a bar, e.g. `Profit/Loss: $150.50`.
    pub fn tooltip_label(&self, value: f64) -> String {
        format!("{}: ${:.2}", self.dataset_label, value)
    }
}
