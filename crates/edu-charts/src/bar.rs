//! Vertical bar chart renderer
//!
//! One bar per data point, left to right in input order. Bar heights are
//! proportional to the dataset maximum, which always fills the plot height.

use crate::{
    BandScale, ChartConfig, ChartFrame, ChartKind, ChartRenderer, Coordinate, EmptyReason,
    LinearScale, Mark, MarkRole, OutputExtent, PathBuilder, RenderFrame, Scale, Shape, Style,
    TextAnchor, Tooltip, colors,
};
use edu_core::{format_value, Dataset};

#[derive(Debug, Clone, Default)]
pub struct BarRenderer {
    pub config: ChartConfig,
}

impl BarRenderer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }
}

impl ChartRenderer for BarRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn layout(&self, dataset: &Dataset, extent: OutputExtent) -> RenderFrame {
        let extent = extent.sanitized();
        if dataset.is_empty() {
            tracing::debug!("bar chart has no data");
            return RenderFrame::empty(ChartKind::Bar, extent, EmptyReason::NoData);
        }

        let config = &self.config;

        let height_scale = LinearScale::for_dataset(dataset).range(0.0, extent.height);
        let x_scale = BandScale::new(dataset.len())
            .range(0.0, extent.width)
            .padding(config.bar_padding, config.bar_padding / 2.0);
        let bar_width = x_scale.bandwidth();

        let mut frame = ChartFrame::new(ChartKind::Bar, extent, extent.viewbox(config.margin));

        for (i, point) in dataset.iter().enumerate() {
            let bar_height = height_scale.scale(point.value);
            let x = x_scale.scale(i);
            let y = extent.height - bar_height;

            frame.marks.push(
                Mark::new(
                    MarkRole::Bar,
                    Shape::Rect {
                        x,
                        y,
                        width: bar_width,
                        height: bar_height,
                    },
                    Style::filled(config.palette.color_for(i, point)),
                )
                .for_element(i),
            );

            frame.marks.push(Mark::new(
                MarkRole::AxisLabel,
                Shape::Text {
                    position: Coordinate::new(x_scale.scale_center(i), extent.height + config.label_gap),
                    content: point.label.clone(),
                    anchor: TextAnchor::Middle,
                },
                Style::filled(colors::TEXT_MUTED),
            ));

            frame.tooltips.push(Tooltip {
                element: i,
                text: format!("{}: {}", point.label, format_value(point.value)),
                anchor: Coordinate::new(x_scale.scale_center(i), y),
            });
        }

        let baseline = PathBuilder::new()
            .move_to(Coordinate::new(0.0, extent.height))
            .line_to(Coordinate::new(extent.width, extent.height))
            .build();
        frame.marks.push(Mark::new(
            MarkRole::Baseline,
            Shape::Path { commands: baseline },
            Style::stroked(colors::GRID, 1.0),
        ));

        RenderFrame::Chart(frame)
    }
}
