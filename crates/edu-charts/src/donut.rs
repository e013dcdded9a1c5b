//! Donut chart renderer
//!
//! Wedges start at 0° and follow input order. The center shows the dataset
//! total; the legend carries the rounded percentages.

use crate::{
    build_wedges, ChartConfig, ChartFrame, ChartKind, ChartMargin, ChartRenderer, Coordinate,
    DonutGeometry, Emphasis, EmptyReason, LegendEntry, Mark, MarkRole, OutputExtent, RenderFrame,
    Shape, Style, TextAnchor, Tooltip, colors,
};
use edu_core::{format_percent, format_value, Dataset};

#[derive(Debug, Clone, Default)]
pub struct DonutRenderer {
    pub config: ChartConfig,
}

impl DonutRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Largest ring that fits the extent, centered
    pub fn geometry(&self, extent: OutputExtent) -> DonutGeometry {
        let outer_radius = extent.width.min(extent.height) / 2.0;
        let thickness = outer_radius * self.config.donut_thickness.clamp(0.0, 1.0);
        DonutGeometry::new(
            Coordinate::new(extent.width / 2.0, extent.height / 2.0),
            outer_radius,
            thickness,
        )
    }
}

impl ChartRenderer for DonutRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Donut
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn layout(&self, dataset: &Dataset, extent: OutputExtent) -> RenderFrame {
        let extent = extent.sanitized();
        if dataset.is_empty() {
            tracing::debug!("donut chart has no data");
            return RenderFrame::empty(ChartKind::Donut, extent, EmptyReason::NoData);
        }

        let config = &self.config;
        let geometry = self.geometry(extent);
        let total = dataset.total();

        let wedges = build_wedges(dataset, &geometry, &config.palette);
        if wedges.is_empty() {
            tracing::debug!(points = dataset.len(), "donut total is zero, drawing no wedges");
        }

        let mut frame = ChartFrame::new(
            ChartKind::Donut,
            extent,
            extent.viewbox(ChartMargin::uniform(0.0)),
        );

        for wedge in &wedges {
            let i = wedge.source_index;
            frame.marks.push(
                Mark::new(
                    MarkRole::Wedge,
                    Shape::Path {
                        commands: wedge.path.clone(),
                    },
                    Style::filled(wedge.color.clone()),
                )
                .for_element(i),
            );
        }

        frame.marks.push(Mark::new(
            MarkRole::CenterTotal,
            Shape::Text {
                position: geometry.center,
                content: format_value(if wedges.is_empty() { 0.0 } else { total }),
                anchor: TextAnchor::Middle,
            },
            Style::filled(colors::TEXT_PRIMARY),
        ));

        frame.legend = dataset
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let share = wedges.get(i).map_or(0.0, |w| w.percentage_of_total);
                LegendEntry {
                    index: i,
                    label: point.label.clone(),
                    color: config.palette.color_for(i, point),
                    share,
                    percent_text: format_percent(share),
                    emphasis: Emphasis::Normal,
                }
            })
            .collect();

        frame.tooltips = dataset
            .iter()
            .enumerate()
            .map(|(i, point)| Tooltip {
                element: i,
                text: format!("{}: {}", point.label, format_value(point.value)),
                anchor: wedges
                    .get(i)
                    .map_or(geometry.center, |w| geometry.wedge_centroid(w.start_angle, w.end_angle)),
            })
            .collect();

        RenderFrame::Chart(frame)
    }
}
