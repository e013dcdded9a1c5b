//! # edu-charts
//!
//! Chart geometry for the Learnhub dashboards.
//! Turns a [`Dataset`] into a [`RenderFrame`]: a flat list of drawable marks
//! (rects, paths, circles, text) plus legend and tooltip descriptors.
//!
//! ## Architecture
//!
//! Rendering is a pure function `render(dataset, extent, highlight) -> frame`,
//! split in two steps: `layout` computes the geometry once per dataset and
//! extent, and [`RenderFrame::highlighted`] applies the hover state on top.
//! The only mutable piece is [`InteractionState`], which tracks the hovered
//! element and is owned by whoever drives the chart.
//!
//! ## Modules
//!
//! - `chartkit` - Scales, path commands, label thinning
//! - `arc` - Polar geometry and donut wedges
//! - `interaction` - Hover state machine and emphasis
//! - `frame` - Render frame primitives
//! - `bar`, `donut`, `line` - The three renderers

pub mod arc;
pub mod bar;
pub mod chartkit;
pub mod config;
pub mod donut;
pub mod frame;
pub mod interaction;
pub mod line;

pub use arc::*;
pub use bar::*;
pub use chartkit::*;
pub use config::*;
pub use donut::*;
pub use frame::*;
pub use interaction::*;
pub use line::*;

pub use edu_core::{colors, DataPoint, Dataset};

use serde::{Deserialize, Serialize};

// ============================================================================
// STRATEGY PATTERN: Chart Renderer
// ============================================================================

/// Strategy trait implemented by the bar, donut and line renderers.
///
/// Implementations must be deterministic: identical inputs yield identical
/// frames, and nothing is cached between calls.
pub trait ChartRenderer {
    fn kind(&self) -> ChartKind;

    fn config(&self) -> &ChartConfig;

    /// Geometry with every element at normal emphasis
    fn layout(&self, dataset: &Dataset, extent: OutputExtent) -> RenderFrame;

    fn render(&self, dataset: &Dataset, extent: OutputExtent, highlight: Highlight) -> RenderFrame {
        self.layout(dataset, extent)
            .highlighted(highlight, self.config().dimmed_opacity)
    }
}

/// Chart variant identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Donut,
    Line,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bar => "Bar",
            Self::Donut => "Donut",
            Self::Line => "Line",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Bar => "chart-bar",
            Self::Donut => "chart-donut",
            Self::Line => "chart-line",
        }
    }

    /// Lay out with the renderer for this kind.
    pub fn layout(&self, config: &ChartConfig, dataset: &Dataset, extent: OutputExtent) -> RenderFrame {
        match self {
            Self::Bar => BarRenderer::new(config.clone()).layout(dataset, extent),
            Self::Donut => DonutRenderer::new(config.clone()).layout(dataset, extent),
            Self::Line => LineRenderer::new(config.clone()).layout(dataset, extent),
        }
    }

    /// Render with the renderer for this kind.
    pub fn render(
        &self,
        config: &ChartConfig,
        dataset: &Dataset,
        extent: OutputExtent,
        highlight: Highlight,
    ) -> RenderFrame {
        self.layout(config, dataset, extent)
            .highlighted(highlight, config.dimmed_opacity)
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Space reserved around the plot area for labels and markers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Compact margins for inline charts
    pub const fn compact() -> Self {
        Self::new(3.0, 3.0, 12.0, 3.0)
    }

    /// Room for line markers above and category labels below
    pub const fn labelled() -> Self {
        Self::new(8.0, 12.0, 24.0, 12.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::labelled()
    }
}

/// Size of the plot area in output units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputExtent {
    pub width: f64,
    pub height: f64,
}

impl OutputExtent {
    pub const DEFAULT_HEIGHT: f64 = 200.0;

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Negative or non-finite sizes collapse to zero.
    pub fn sanitized(self) -> Self {
        let clean = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self::new(clean(self.width), clean(self.height))
    }

    /// Viewport covering the plot area plus margins
    pub fn viewbox(&self, margin: ChartMargin) -> ViewBox {
        ViewBox {
            x: -margin.left,
            y: -margin.top,
            width: self.width + margin.left + margin.right,
            height: self.height + margin.top + margin.bottom,
        }
    }
}

impl Default for OutputExtent {
    fn default() -> Self {
        Self::new(400.0, Self::DEFAULT_HEIGHT)
    }
}

/// Visible region of a frame, in the same units as the marks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// ViewBox attribute string for SVG
    pub fn to_attr(&self) -> String {
        format!("{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewbox_includes_margins() {
        let extent = OutputExtent::new(400.0, 200.0);
        let vb = extent.viewbox(ChartMargin::new(8.0, 12.0, 24.0, 12.0));
        assert_eq!(vb.to_attr(), "-12 -8 424 232");
    }

    #[test]
    fn test_sanitized_extent() {
        let extent = OutputExtent::new(-5.0, f64::NAN).sanitized();
        assert_eq!(extent, OutputExtent::new(0.0, 0.0));
    }

    #[test]
    fn test_kind_dispatch_matches_renderer() {
        let config = ChartConfig::default();
        let data = Dataset::from_pairs([("a", 1.0)]);
        let frame = ChartKind::Line.render(&config, &data, config.extent(), Highlight::Idle);
        assert!(frame.is_empty());
        let frame = ChartKind::Bar.render(&config, &data, config.extent(), Highlight::Idle);
        assert_eq!(frame.kind(), ChartKind::Bar);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_render_is_layout_plus_highlight() {
        let config = ChartConfig::default();
        let data = Dataset::from_pairs([("a", 10.0), ("b", 20.0), ("c", 5.0)]);
        for kind in [ChartKind::Bar, ChartKind::Donut, ChartKind::Line] {
            let layout = kind.layout(&config, &data, config.extent());
            assert_eq!(layout, kind.render(&config, &data, config.extent(), Highlight::Idle));

            let hovered = kind.render(&config, &data, config.extent(), Highlight::Hovering(2));
            assert_eq!(
                hovered,
                layout.highlighted(Highlight::Hovering(2), config.dimmed_opacity),
                "{}",
                kind.label()
            );
            assert_eq!(hovered.tooltip().map(|t| t.element), Some(2));
        }
    }

    #[test]
    fn test_every_kind_renders_deterministically() {
        let config = ChartConfig::default();
        let data = Dataset::from_pairs([("a", 10.0), ("b", 20.0), ("c", 5.0)]);
        for kind in [ChartKind::Bar, ChartKind::Donut, ChartKind::Line] {
            for highlight in [Highlight::Idle, Highlight::Hovering(1)] {
                let first = kind.render(&config, &data, config.extent(), highlight);
                let second = kind.render(&config, &data, config.extent(), highlight);
                assert_eq!(
                    serde_json::to_string(&first).unwrap(),
                    serde_json::to_string(&second).unwrap(),
                    "{} frames differ",
                    kind.label()
                );
            }
        }
    }
}
