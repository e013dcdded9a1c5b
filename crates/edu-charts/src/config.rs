//! Chart configuration with recognized defaults

use crate::{ChartMargin, OutputExtent};
use edu_core::{colors, DataPoint};
use serde::{Deserialize, Serialize};

/// Ordered fallback colors, indexed by `i mod len`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(pub Vec<String>);

impl Palette {
    pub fn new<S: Into<String>>(colors: impl IntoIterator<Item = S>) -> Self {
        Self(colors.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Palette entry for `index`; an empty palette yields the neutral color.
    pub fn color(&self, index: usize) -> &str {
        if self.0.is_empty() {
            return colors::NEUTRAL;
        }
        &self.0[index % self.0.len()]
    }

    /// The point's own color if it has one, else the palette entry.
    pub fn color_for(&self, index: usize, point: &DataPoint) -> String {
        point
            .color
            .clone()
            .unwrap_or_else(|| self.color(index).to_string())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(colors::PALETTE)
    }
}

/// Rendering constants shared by all chart kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
    pub palette: Palette,
    /// Upper bound on x-axis labels for line charts
    pub max_labels: usize,
    pub area_opacity_top: f64,
    pub area_opacity_bottom: f64,
    /// Opacity of elements that are not the hovered one
    pub dimmed_opacity: f64,
    pub stroke_width: f64,
    pub marker_radius: f64,
    /// Inner band padding between bars, as a fraction of the step
    pub bar_padding: f64,
    /// Ring thickness as a fraction of the donut's outer radius
    pub donut_thickness: f64,
    /// Distance from the plot bottom to the category label baseline
    pub label_gap: f64,
    pub line_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 200.0,
            margin: ChartMargin::labelled(),
            palette: Palette::default(),
            max_labels: 5,
            area_opacity_top: 0.5,
            area_opacity_bottom: 0.0,
            dimmed_opacity: 0.3,
            stroke_width: 2.0,
            marker_radius: 4.0,
            bar_padding: 0.2,
            donut_thickness: 0.35,
            label_gap: 16.0,
            line_color: colors::INDIGO.to_string(),
        }
    }
}

impl ChartConfig {
    /// Small inline charts for table cells and summary cards
    pub fn compact() -> Self {
        Self {
            width: 160.0,
            height: 48.0,
            margin: ChartMargin::compact(),
            max_labels: 2,
            stroke_width: 1.5,
            marker_radius: 2.5,
            label_gap: 10.0,
            ..Self::default()
        }
    }

    /// Default output extent for this config
    pub fn extent(&self) -> OutputExtent {
        OutputExtent::new(self.width, self.height)
    }
}
