//! Line chart renderer with gradient area fill
//!
//! Points are spread evenly across the width; the first sits on the left edge
//! and the last on the right edge. Needs at least two points.

use crate::{
    area_path, line_path, ChartConfig, ChartFrame, ChartKind, ChartRenderer, Coordinate,
    EmptyReason, Fill, LabelThinner, LinearScale, Mark, MarkRole, OutputExtent, RenderFrame,
    Scale, Shape, Style, TextAnchor, Tooltip, colors,
};
use edu_core::{format_value, Dataset};

#[derive(Debug, Clone, Default)]
pub struct LineRenderer {
    pub config: ChartConfig,
}

impl LineRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Output coordinate of every point; x strictly increases with index.
    pub fn coordinates(&self, dataset: &Dataset, extent: OutputExtent) -> Vec<Coordinate> {
        let n = dataset.len();
        let y_scale = LinearScale::for_dataset(dataset).range(extent.height, 0.0);
        // Guarded so a single point does not divide by zero.
        let x_step = extent.width / n.saturating_sub(1).max(1) as f64;

        dataset
            .iter()
            .enumerate()
            .map(|(i, point)| Coordinate::new(i as f64 * x_step, y_scale.scale(point.value)))
            .collect()
    }
}

impl ChartRenderer for LineRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn layout(&self, dataset: &Dataset, extent: OutputExtent) -> RenderFrame {
        let extent = extent.sanitized();
        let config = &self.config;
        let points = self.coordinates(dataset, extent);

        let (line, area) = match line_path(&points).and_then(|line| {
            area_path(&points, extent.height).map(|area| (line, area))
        }) {
            Ok(paths) => paths,
            Err(insufficient) => {
                tracing::debug!(points = insufficient.actual, "line chart needs at least two points");
                return RenderFrame::empty(
                    ChartKind::Line,
                    extent,
                    EmptyReason::InsufficientData(insufficient),
                );
            }
        };

        let color = config.line_color.as_str();
        let mut frame = ChartFrame::new(ChartKind::Line, extent, extent.viewbox(config.margin));

        let area_style = Style {
            fill: Fill::VerticalGradient {
                color: color.to_string(),
                top_opacity: config.area_opacity_top,
                bottom_opacity: config.area_opacity_bottom,
            },
            stroke: None,
            opacity: 1.0,
        };
        frame.marks.push(Mark::new(MarkRole::Area, Shape::Path { commands: area }, area_style));
        frame.marks.push(Mark::new(
            MarkRole::Line,
            Shape::Path { commands: line },
            Style::stroked(color, config.stroke_width),
        ));

        for (i, &center) in points.iter().enumerate() {
            let radius = config.marker_radius;
            frame.marks.push(
                Mark::new(MarkRole::Marker, Shape::Circle { center, radius }, Style::filled(color))
                    .for_element(i),
            );
        }

        let thinner = LabelThinner::new(config.max_labels);
        for i in thinner.select(dataset.len()) {
            let Some(point) = dataset.get(i) else { continue };
            let anchor = if i == 0 {
                TextAnchor::Start
            } else if i + 1 == dataset.len() {
                TextAnchor::End
            } else {
                TextAnchor::Middle
            };
            frame.marks.push(Mark::new(
                MarkRole::AxisLabel,
                Shape::Text {
                    position: Coordinate::new(points[i].x, extent.height + config.label_gap),
                    content: point.label.clone(),
                    anchor,
                },
                Style::filled(colors::TEXT_MUTED),
            ));
        }

        frame.tooltips = dataset
            .iter()
            .zip(&points)
            .enumerate()
            .map(|(i, (point, &anchor))| Tooltip {
                element: i,
                text: format!("{}: {}", point.label, format_value(point.value)),
                anchor,
            })
            .collect();

        RenderFrame::Chart(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Emphasis, Highlight, PathCommand};

    fn weekly() -> Dataset {
        Dataset::from_pairs([
            ("Mon", 4.0),
            ("Tue", 9.0),
            ("Wed", 2.0),
            ("Thu", 12.0),
            ("Fri", 7.0),
            ("Sat", 0.0),
            ("Sun", 3.0),
        ])
    }

    fn marker_centers(frame: &RenderFrame) -> Vec<Coordinate> {
        frame
            .chart()
            .unwrap()
            .marks_with_role(MarkRole::Marker)
            .map(|m| match m.shape {
                Shape::Circle { center, .. } => center,
                _ => panic!("marker must be a circle"),
            })
            .collect()
    }

    #[test]
    fn test_single_point_is_insufficient_data() {
        let data = Dataset::from_pairs([("only", 5.0)]);
        let frame = LineRenderer::default().render(&data, OutputExtent::default(), Highlight::Idle);
        match frame.empty_reason() {
            Some(EmptyReason::InsufficientData(info)) => {
                assert_eq!(info.required, 2);
                assert_eq!(info.actual, 1);
            }
            other => panic!("expected insufficient data, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_dataset_is_insufficient_data() {
        let frame = LineRenderer::default().render(&Dataset::default(), OutputExtent::default(), Highlight::Hovering(0));
        assert!(frame.is_empty());
    }

    #[test]
    fn test_x_strictly_increases() {
        let frame = LineRenderer::default().render(&weekly(), OutputExtent::new(300.0, 200.0), Highlight::Idle);
        let centers = marker_centers(&frame);
        assert_eq!(centers.len(), 7);
        assert!(centers.windows(2).all(|w| w[0].x < w[1].x));
        assert_eq!(centers[0].x, 0.0);
        assert_eq!(centers[6].x, 300.0);
    }

    #[test]
    fn test_x_strictly_increases_for_any_length() {
        for n in [2usize, 3, 10, 99, 1000] {
            let data: Dataset = (0..n)
                .map(|i| edu_core::DataPoint::new(format!("d{i}"), (i % 7) as f64))
                .collect();
            for width in [1.0, 37.5, 400.0] {
                let frame = LineRenderer::default().render(&data, OutputExtent::new(width, 100.0), Highlight::Idle);
                let centers = marker_centers(&frame);
                assert_eq!(centers.len(), n);
                assert!(centers.windows(2).all(|w| w[0].x < w[1].x), "n = {n}, width = {width}");
                assert!((centers[n - 1].x - width).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_highlighted_marker_grows() {
        let data = Dataset::from_pairs([("a", 1.0), ("b", 4.0), ("c", 2.0)]);
        let frame = LineRenderer::default().render(&data, OutputExtent::default(), Highlight::Hovering(1));
        let radii: Vec<f64> = frame
            .chart()
            .unwrap()
            .marks_with_role(MarkRole::Marker)
            .map(|m| match m.shape {
                Shape::Circle { radius, .. } => radius,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(radii, vec![4.0, 6.0, 4.0]);
    }

    #[test]
    fn test_max_value_touches_top_and_zero_touches_baseline() {
        let frame = LineRenderer::default().render(&weekly(), OutputExtent::new(300.0, 200.0), Highlight::Idle);
        let centers = marker_centers(&frame);
        assert_eq!(centers[3].y, 0.0);
        assert_eq!(centers[5].y, 200.0);
    }

    #[test]
    fn test_area_uses_configured_gradient() {
        let frame = LineRenderer::default().render(&weekly(), OutputExtent::new(300.0, 200.0), Highlight::Idle);
        let area = frame.chart().unwrap().marks_with_role(MarkRole::Area).next().unwrap();
        assert_eq!(
            area.style.fill,
            Fill::VerticalGradient {
                color: colors::INDIGO.to_string(),
                top_opacity: 0.5,
                bottom_opacity: 0.0,
            }
        );
        let Shape::Path { commands } = &area.shape else {
            panic!("area must be a path");
        };
        assert_eq!(commands.last(), Some(&PathCommand::ClosePath));
    }

    #[test]
    fn test_labels_are_thinned() {
        let data: Dataset = (0..20)
            .map(|i| edu_core::DataPoint::new(format!("W{i}"), i as f64))
            .collect();
        let frame = LineRenderer::default().render(&data, OutputExtent::default(), Highlight::Idle);
        let labels: Vec<String> = frame
            .chart()
            .unwrap()
            .marks_with_role(MarkRole::AxisLabel)
            .map(|m| match &m.shape {
                Shape::Text { content, .. } => content.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(labels, vec!["W0", "W5", "W10", "W15", "W19"]);
    }

    #[test]
    fn test_tooltip_matches_marker() {
        let data = Dataset::from_pairs([("a", 1.0), ("b", 4.0), ("c", 2.0)]);
        let frame = LineRenderer::default().render(&data, OutputExtent::new(200.0, 100.0), Highlight::Hovering(1));
        let chart = frame.chart().unwrap();

        let tooltip = chart.tooltip.as_ref().unwrap();
        let marker = chart.mark_for(MarkRole::Marker, 1).unwrap();
        let Shape::Circle { center, .. } = marker.shape else {
            panic!("marker must be a circle");
        };
        assert_eq!(tooltip.anchor, center);
        assert_eq!(tooltip.text, "b: 4");

        assert!(chart.mark_for(MarkRole::Marker, 0).unwrap().emphasis.is_reduced());
        assert!(chart.mark_for(MarkRole::Marker, 2).unwrap().emphasis.is_reduced());
        assert!(!marker.emphasis.is_reduced());
    }

    #[test]
    fn test_leaving_clears_emphasis() {
        let data = Dataset::from_pairs([("a", 1.0), ("b", 4.0), ("c", 2.0)]);
        let frame = LineRenderer::default().render(&data, OutputExtent::default(), Highlight::Idle);
        let chart = frame.chart().unwrap();
        assert!(chart.tooltip.is_none());
        assert!(chart.marks.iter().all(|m| m.emphasis == Emphasis::Normal));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = LineRenderer::default();
        let data = weekly();
        let a = renderer.render(&data, OutputExtent::new(320.0, 180.0), Highlight::Hovering(3));
        let b = renderer.render(&data, OutputExtent::new(320.0, 180.0), Highlight::Hovering(3));
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }
}
