//! Render frame primitives
//!
//! A frame is what a renderer hands to the drawing surface: marks with their
//! style, plus the legend and tooltip descriptors derived from the highlight.
//!
//! Renderers lay a frame out once with every element at normal emphasis;
//! [`RenderFrame::highlighted`] then applies a highlight without touching the
//! geometry.

/// Marker growth factor for the highlighted element
pub const HIGHLIGHT_RADIUS_SCALE: f64 = 1.5;

use crate::{
    ChartKind, Coordinate, Highlight, InsufficientData, OutputExtent, PathCommand, ViewBox,
};
use serde::{Deserialize, Serialize};

/// Visual weight of an element relative to the current highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    #[default]
    Normal,
    Highlighted,
    Dimmed,
}

impl Emphasis {
    pub fn is_reduced(&self) -> bool {
        matches!(self, Self::Dimmed)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Normal => "mark-normal",
            Self::Highlighted => "mark-highlighted",
            Self::Dimmed => "mark-dimmed",
        }
    }

    /// Opacity for this emphasis, given the configured dimmed opacity
    pub fn opacity(&self, dimmed_opacity: f64) -> f64 {
        match self {
            Self::Normal | Self::Highlighted => 1.0,
            Self::Dimmed => dimmed_opacity,
        }
    }

    /// Radius of a circle mark drawn at `radius` when normal
    pub fn radius(&self, radius: f64) -> f64 {
        match self {
            Self::Highlighted => radius * HIGHLIGHT_RADIUS_SCALE,
            Self::Normal | Self::Dimmed => radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    None,
    Solid { color: String },
    /// Top-to-bottom fade of a single color
    VerticalGradient {
        color: String,
        top_opacity: f64,
        bottom_opacity: f64,
    },
}

impl Fill {
    pub fn solid(color: impl Into<String>) -> Self {
        Self::Solid {
            color: color.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill: Fill,
    pub stroke: Option<Stroke>,
    pub opacity: f64,
}

impl Style {
    pub fn filled(color: impl Into<String>) -> Self {
        Self {
            fill: Fill::solid(color),
            stroke: None,
            opacity: 1.0,
        }
    }

    pub fn stroked(color: impl Into<String>, width: f64) -> Self {
        Self {
            fill: Fill::None,
            stroke: Some(Stroke {
                color: color.into(),
                width,
            }),
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_attr(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Geometry of a single mark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Path {
        commands: Vec<PathCommand>,
    },
    Circle {
        center: Coordinate,
        radius: f64,
    },
    Text {
        position: Coordinate,
        content: String,
        anchor: TextAnchor,
    },
}

/// What a mark represents, used for styling hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkRole {
    Bar,
    Wedge,
    Line,
    Area,
    Marker,
    Baseline,
    AxisLabel,
    CenterTotal,
}

impl MarkRole {
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Wedge => "wedge",
            Self::Line => "line",
            Self::Area => "area",
            Self::Marker => "marker",
            Self::Baseline => "baseline",
            Self::AxisLabel => "axis-label",
            Self::CenterTotal => "center-total",
        }
    }
}

/// A drawable primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub role: MarkRole,
    /// Dataset index this mark stands for; `Some` marks take pointer events
    pub element: Option<usize>,
    pub shape: Shape,
    pub style: Style,
    pub emphasis: Emphasis,
}

impl Mark {
    pub fn new(role: MarkRole, shape: Shape, style: Style) -> Self {
        Self {
            role,
            element: None,
            shape,
            style,
            emphasis: Emphasis::Normal,
        }
    }

    pub fn for_element(mut self, element: usize) -> Self {
        self.element = Some(element);
        self
    }

    /// Set emphasis and apply it to a normal mark's opacity and radius
    pub fn with_emphasis(mut self, emphasis: Emphasis, dimmed_opacity: f64) -> Self {
        self.emphasis = emphasis;
        self.style.opacity *= emphasis.opacity(dimmed_opacity);
        if let Shape::Circle { radius, .. } = &mut self.shape {
            *radius = emphasis.radius(*radius);
        }
        self
    }

    /// Emphasis under `highlight`; marks without an element stay normal.
    pub fn emphasis_under(&self, highlight: Highlight) -> Emphasis {
        self.element
            .map_or(Emphasis::Normal, |element| highlight.emphasis(element))
    }
}

/// Hover tooltip for one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub element: usize,
    /// `"<label>: <value>"`
    pub text: String,
    pub anchor: Coordinate,
}

/// Legend row; hovering it drives the same highlight as the mark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub index: usize,
    pub label: String,
    pub color: String,
    /// Unrounded share of the total
    pub share: f64,
    pub percent_text: String,
    pub emphasis: Emphasis,
}

/// A drawable chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub kind: ChartKind,
    pub extent: OutputExtent,
    pub viewbox: ViewBox,
    pub marks: Vec<Mark>,
    pub legend: Vec<LegendEntry>,
    /// Tooltip of every dataset element, by index
    pub tooltips: Vec<Tooltip>,
    /// Tooltip of the highlighted element
    pub tooltip: Option<Tooltip>,
}

impl ChartFrame {
    pub fn new(kind: ChartKind, extent: OutputExtent, viewbox: ViewBox) -> Self {
        Self {
            kind,
            extent,
            viewbox,
            marks: Vec::new(),
            legend: Vec::new(),
            tooltips: Vec::new(),
            tooltip: None,
        }
    }

    /// Apply `highlight` to a frame laid out at normal emphasis.
    ///
    /// A highlight past the last element is dropped.
    pub fn highlighted(mut self, highlight: Highlight, dimmed_opacity: f64) -> Self {
        let highlight = highlight.validated(self.tooltips.len());

        self.marks = self
            .marks
            .into_iter()
            .map(|mark| {
                let emphasis = mark.emphasis_under(highlight);
                mark.with_emphasis(emphasis, dimmed_opacity)
            })
            .collect();
        for entry in &mut self.legend {
            entry.emphasis = highlight.emphasis(entry.index);
        }
        self.tooltip = highlight
            .active_index()
            .and_then(|i| self.tooltips.get(i).cloned());
        self
    }

    pub fn marks_with_role(&self, role: MarkRole) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(move |m| m.role == role)
    }

    /// The primary mark for a dataset index
    pub fn mark_for(&self, role: MarkRole, element: usize) -> Option<&Mark> {
        self.marks_with_role(role).find(|m| m.element == Some(element))
    }
}

/// Why nothing was drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum EmptyReason {
    NoData,
    InsufficientData(InsufficientData),
}

impl EmptyReason {
    /// Placeholder text for the empty state
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoData => "No data yet",
            Self::InsufficientData(_) => "Not enough data to draw a trend",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmptyFrame {
    pub kind: ChartKind,
    pub extent: OutputExtent,
    pub reason: EmptyReason,
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderFrame {
    Chart(ChartFrame),
    Empty(EmptyFrame),
}

impl RenderFrame {
    pub fn empty(kind: ChartKind, extent: OutputExtent, reason: EmptyReason) -> Self {
        Self::Empty(EmptyFrame {
            kind,
            extent,
            reason,
        })
    }

    /// See [`ChartFrame::highlighted`]; empty frames pass through.
    pub fn highlighted(self, highlight: Highlight, dimmed_opacity: f64) -> Self {
        match self {
            Self::Chart(frame) => Self::Chart(frame.highlighted(highlight, dimmed_opacity)),
            Self::Empty(_) => self,
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Chart(frame) => frame.kind,
            Self::Empty(frame) => frame.kind,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    pub fn chart(&self) -> Option<&ChartFrame> {
        match self {
            Self::Chart(frame) => Some(frame),
            Self::Empty(_) => None,
        }
    }

    pub fn empty_reason(&self) -> Option<EmptyReason> {
        match self {
            Self::Chart(_) => None,
            Self::Empty(frame) => Some(frame.reason),
        }
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.chart().and_then(|frame| frame.tooltip.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_opacity() {
        assert_eq!(Emphasis::Normal.opacity(0.3), 1.0);
        assert_eq!(Emphasis::Highlighted.opacity(0.3), 1.0);
        assert_eq!(Emphasis::Dimmed.opacity(0.3), 0.3);
        assert!(Emphasis::Dimmed.is_reduced());
    }

    #[test]
    fn test_mark_emphasis_scales_style_opacity() {
        let mark = Mark::new(
            MarkRole::Area,
            Shape::Path { commands: vec![] },
            Style::filled("#000").with_opacity(0.5),
        )
        .with_emphasis(Emphasis::Dimmed, 0.4);
        assert!((mark.style.opacity - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_highlighted_circle_grows() {
        let mark = Mark::new(
            MarkRole::Marker,
            Shape::Circle {
                center: Coordinate::new(0.0, 0.0),
                radius: 4.0,
            },
            Style::filled("#000"),
        )
        .for_element(0);
        let highlighted = mark.clone().with_emphasis(Emphasis::Highlighted, 0.3);
        assert!(matches!(highlighted.shape, Shape::Circle { radius, .. } if radius == 6.0));
        let dimmed = mark.with_emphasis(Emphasis::Dimmed, 0.3);
        assert!(matches!(dimmed.shape, Shape::Circle { radius, .. } if radius == 4.0));
    }

    #[test]
    fn test_highlighting_leaves_geometry_alone() {
        let mut layout = ChartFrame::new(
            ChartKind::Bar,
            OutputExtent::default(),
            OutputExtent::default().viewbox(crate::ChartMargin::default()),
        );
        for i in 0..3 {
            let x = i as f64 * 10.0;
            layout.marks.push(
                Mark::new(
                    MarkRole::Bar,
                    Shape::Rect {
                        x,
                        y: 0.0,
                        width: 8.0,
                        height: 5.0,
                    },
                    Style::filled("#000"),
                )
                .for_element(i),
            );
            layout.tooltips.push(Tooltip {
                element: i,
                text: format!("{i}"),
                anchor: Coordinate::new(x, 0.0),
            });
        }
        layout.marks.push(Mark::new(
            MarkRole::Baseline,
            Shape::Path { commands: vec![] },
            Style::stroked("#000", 1.0),
        ));

        let frame = layout.clone().highlighted(Highlight::Hovering(1), 0.3);
        let shapes = |f: &ChartFrame| f.marks.iter().map(|m| m.shape.clone()).collect::<Vec<_>>();
        assert_eq!(shapes(&frame), shapes(&layout));

        let emphasis: Vec<Emphasis> = frame.marks.iter().map(|m| m.emphasis).collect();
        assert_eq!(
            emphasis,
            vec![Emphasis::Dimmed, Emphasis::Highlighted, Emphasis::Dimmed, Emphasis::Normal]
        );
        assert_eq!(frame.tooltip.as_ref().map(|t| t.element), Some(1));

        let stale = layout.clone().highlighted(Highlight::Hovering(3), 0.3);
        assert_eq!(stale, layout);
    }

    #[test]
    fn test_empty_frame_accessors() {
        let frame = RenderFrame::empty(
            ChartKind::Line,
            OutputExtent::default(),
            EmptyReason::InsufficientData(InsufficientData {
                required: 2,
                actual: 1,
            }),
        );
        assert!(frame.is_empty());
        assert!(frame.chart().is_none());
        assert!(frame.tooltip().is_none());
        assert_eq!(
            frame.empty_reason().map(|r| r.message()),
            Some("Not enough data to draw a trend")
        );
    }

    #[test]
    fn test_frame_serializes_with_tags() {
        let frame = RenderFrame::empty(ChartKind::Bar, OutputExtent::new(10.0, 20.0), EmptyReason::NoData);
        let json = serde_json::to_string(&frame).unwrap();
        assert_eq!(
            json,
            r#"{"state":"empty","kind":"bar","extent":{"width":10.0,"height":20.0},"reason":{"reason":"no_data"}}"#
        );
    }
}
