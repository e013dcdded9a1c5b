//! Polar geometry and donut wedge construction
//!
//! Angles are in degrees, measured from the positive x axis. With y growing
//! downwards (screen space) positive angles turn clockwise.

use crate::{Coordinate, Palette, PathBuilder, PathCommand};
use edu_core::Dataset;
use serde::{Deserialize, Serialize};

/// Sweeps this close to a full turn are drawn as a closed ring.
const FULL_TURN_EPSILON: f64 = 1e-9;

/// Point at `angle_deg` on the circle of `radius` around `center`.
pub fn polar_to_cartesian(center: Coordinate, radius: f64, angle_deg: f64) -> Coordinate {
    let theta = angle_deg.to_radians();
    Coordinate::new(
        center.x + radius * theta.cos(),
        center.y + radius * theta.sin(),
    )
}

/// Annulus that wedges are cut from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutGeometry {
    pub center: Coordinate,
    pub outer_radius: f64,
    /// Ring thickness; equal to `outer_radius` for a pie
    pub thickness: f64,
}

impl DonutGeometry {
    pub fn new(center: Coordinate, outer_radius: f64, thickness: f64) -> Self {
        Self {
            center,
            outer_radius,
            thickness,
        }
    }

    pub fn inner_radius(&self) -> f64 {
        (self.outer_radius - self.thickness).max(0.0)
    }

    /// Radius halfway through the ring
    pub fn mid_radius(&self) -> f64 {
        (self.outer_radius + self.inner_radius()) / 2.0
    }

    /// Closed annular sector between two angles.
    ///
    /// Outer arc forward, radial line inward, inner arc backward, close.
    pub fn wedge_path(&self, start_angle: f64, end_angle: f64) -> Vec<PathCommand> {
        let sweep = end_angle - start_angle;
        let outer = self.outer_radius;
        let inner = self.inner_radius();
        let at = |radius: f64, angle: f64| polar_to_cartesian(self.center, radius, angle);

        // Coincident arc endpoints draw nothing, so a full ring is split in two halves.
        if sweep >= 360.0 - FULL_TURN_EPSILON {
            let mid_angle = start_angle + 180.0;
            let builder = PathBuilder::new()
                .move_to(at(outer, start_angle))
                .arc_to(outer, false, true, at(outer, mid_angle))
                .arc_to(outer, false, true, at(outer, end_angle))
                .close();

            if inner <= 0.0 {
                return builder.build();
            }
            return builder
                .move_to(at(inner, end_angle))
                .arc_to(inner, false, false, at(inner, mid_angle))
                .arc_to(inner, false, false, at(inner, start_angle))
                .close()
                .build();
        }

        let large_arc = sweep > 180.0;
        let builder = PathBuilder::new()
            .move_to(at(outer, start_angle))
            .arc_to(outer, large_arc, true, at(outer, end_angle));

        let builder = if inner > 0.0 {
            builder
                .line_to(at(inner, end_angle))
                .arc_to(inner, large_arc, false, at(inner, start_angle))
        } else {
            builder.line_to(self.center)
        };

        builder.close().build()
    }

    /// Anchor halfway along the wedge, halfway through the ring
    pub fn wedge_centroid(&self, start_angle: f64, end_angle: f64) -> Coordinate {
        polar_to_cartesian(self.center, self.mid_radius(), (start_angle + end_angle) / 2.0)
    }
}

/// One donut slice derived from one data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WedgeSegment {
    pub source_index: usize,
    pub path: Vec<PathCommand>,
    pub color: String,
    /// Unrounded `value / total`
    pub percentage_of_total: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl WedgeSegment {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn large_arc(&self) -> bool {
        self.sweep() > 180.0
    }
}

/// Cut the ring into consecutive wedges, one per data point, in input order.
///
/// Returns no wedges when the dataset total is not positive.
pub fn build_wedges(
    dataset: &Dataset,
    geometry: &DonutGeometry,
    palette: &Palette,
) -> Vec<WedgeSegment> {
    let total = dataset.total();
    if total <= 0.0 || !total.is_finite() {
        return Vec::new();
    }

    let mut cumulative_angle = 0.0;

    dataset
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let share = point.value / total;
            let sweep = share * 360.0;
            let start_angle = cumulative_angle;
            let end_angle = cumulative_angle + sweep;
            cumulative_angle += sweep;

            WedgeSegment {
                source_index: i,
                path: geometry.wedge_path(start_angle, end_angle),
                color: palette.color_for(i, point),
                percentage_of_total: share,
                start_angle,
                end_angle,
            }
        })
        .collect()
}
