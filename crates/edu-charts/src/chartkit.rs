//! # chartkit
//!
//! Core chart primitives: scales, path commands, label thinning.

use edu_core::Dataset;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use thiserror::Error;

// ============================================================================
// SCALE
// ============================================================================

/// Map `value` from `[0, domain_max]` onto `[0, output_max]`.
///
/// No clamping; callers guard `domain_max` with [`domain_max`].
pub fn scale(value: f64, domain_max: f64, output_max: f64) -> f64 {
    (value / domain_max) * output_max
}

/// Largest dataset value, or `1.0` when the dataset is empty or not positive.
pub fn domain_max(dataset: &Dataset) -> f64 {
    match dataset.max_value() {
        Some(max) if max > 0.0 => max,
        _ => 1.0,
    }
}

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale {
    fn scale(&self, value: f64) -> f64;
}

/// Linear scale from `[d_min, d_max]` to `[r_min, r_max]`.
///
/// Ranges may be inverted (`range(height, 0.0)`) for y axes that grow downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    /// Zero-based domain sized to the dataset, see [`domain_max`].
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self::new().domain(0.0, domain_max(dataset))
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        let span = d_max - d_min;
        let span = if span.abs() < f64::EPSILON { 1.0 } else { span };

        r_min + scale(value - d_min, span, r_max - r_min)
    }
}

// ============================================================================
// BAND SCALE
// ============================================================================

/// Band scale for categorical x positions (one band per bar)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    domain_count: usize,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

impl BandScale {
    pub fn new(count: usize) -> Self {
        Self {
            domain_count: count,
            range: (0.0, 1.0),
            padding_inner: 0.1,
            padding_outer: 0.05,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.clamp(0.0, 1.0);
        self.padding_outer = outer.clamp(0.0, 1.0);
        self
    }

    /// Distance between the starts of adjacent bands
    pub fn step(&self) -> f64 {
        if self.domain_count == 0 {
            return 0.0;
        }

        let (r_min, r_max) = self.range;
        let n = self.domain_count as f64;
        let slots = (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        (r_max - r_min) / slots
    }

    /// Width of each band
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start position of band `index`
    pub fn scale(&self, index: usize) -> f64 {
        let step = self.step();
        self.range.0 + self.padding_outer * step + index as f64 * step
    }

    pub fn scale_center(&self, index: usize) -> f64 {
        self.scale(index) + self.bandwidth() / 2.0
    }
}

// ============================================================================
// PATH COMMANDS
// ============================================================================

/// A point in output space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One vector path instruction.
///
/// `ArcTo` follows SVG arc semantics: circular arc of `radius` to `to`, with
/// `large_arc` selecting the arc longer than a semicircle and `sweep` the
/// positive-angle (clockwise on screen) direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathCommand {
    MoveTo(Coordinate),
    LineTo(Coordinate),
    ArcTo {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Coordinate,
    },
    ClosePath,
}

impl PathCommand {
    /// End point of the command, if it has one
    pub fn end_point(&self) -> Option<Coordinate> {
        match *self {
            Self::MoveTo(c) | Self::LineTo(c) => Some(c),
            Self::ArcTo { to, .. } => Some(to),
            Self::ClosePath => None,
        }
    }
}

/// Path builder with fluent API
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    pub fn move_to(mut self, to: Coordinate) -> Self {
        self.commands.push(PathCommand::MoveTo(to));
        self
    }

    pub fn line_to(mut self, to: Coordinate) -> Self {
        self.commands.push(PathCommand::LineTo(to));
        self
    }

    pub fn arc_to(mut self, radius: f64, large_arc: bool, sweep: bool, to: Coordinate) -> Self {
        self.commands.push(PathCommand::ArcTo {
            radius,
            large_arc,
            sweep,
            to,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::ClosePath);
        self
    }

    pub fn build(self) -> Vec<PathCommand> {
        self.commands
    }
}

/// Too few points to build a line or area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("need at least {required} points to draw, got {actual}")]
pub struct InsufficientData {
    pub required: usize,
    pub actual: usize,
}

fn require_points(points: &[Coordinate]) -> Result<(), InsufficientData> {
    if points.len() < 2 {
        return Err(InsufficientData {
            required: 2,
            actual: points.len(),
        });
    }
    Ok(())
}

fn polyline(points: &[Coordinate]) -> PathBuilder {
    let mut builder = PathBuilder::new().move_to(points[0]);
    for &point in &points[1..] {
        builder = builder.line_to(point);
    }
    builder
}

/// Open piecewise-linear path through every point, in order.
pub fn line_path(points: &[Coordinate]) -> Result<Vec<PathCommand>, InsufficientData> {
    require_points(points)?;
    Ok(polyline(points).build())
}

/// Closed path under the polyline, dropping to `baseline_y` at both ends.
pub fn area_path(
    points: &[Coordinate],
    baseline_y: f64,
) -> Result<Vec<PathCommand>, InsufficientData> {
    require_points(points)?;

    let first = points[0];
    let last = points[points.len() - 1];

    Ok(polyline(points)
        .line_to(Coordinate::new(last.x, baseline_y))
        .line_to(Coordinate::new(first.x, baseline_y))
        .close()
        .build())
}

/// Serialize commands as an SVG `d` attribute.
pub fn to_svg_path(commands: &[PathCommand]) -> String {
    let mut path = String::with_capacity(commands.len() * 20);

    for command in commands {
        // Writing into a String cannot fail.
        let _ = match *command {
            PathCommand::MoveTo(c) => write!(path, "M{:.2},{:.2}", c.x, c.y),
            PathCommand::LineTo(c) => write!(path, "L{:.2},{:.2}", c.x, c.y),
            PathCommand::ArcTo {
                radius,
                large_arc,
                sweep,
                to,
            } => write!(
                path,
                "A{:.2},{:.2},0,{},{},{:.2},{:.2}",
                radius, radius, large_arc as u8, sweep as u8, to.x, to.y
            ),
            PathCommand::ClosePath => write!(path, "Z"),
        };
    }

    path
}

// ============================================================================
// LABEL THINNING
// ============================================================================

/// Picks a sparse, deterministic subset of axis labels.
///
/// The first and last index are always kept; in between, every
/// `ceil(n / (max_labels - 1))`-th index is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelThinner {
    pub max_labels: usize,
}

impl LabelThinner {
    pub fn new(max_labels: usize) -> Self {
        Self { max_labels }
    }

    /// Stride between kept labels for `count` points
    pub fn stride(&self, count: usize) -> usize {
        let intervals = self.max_labels.saturating_sub(1).max(1);
        count.div_ceil(intervals).max(1)
    }

    pub fn shows(&self, index: usize, count: usize) -> bool {
        if index >= count {
            return false;
        }
        index == 0 || index + 1 == count || index % self.stride(count) == 0
    }

    /// Indices to label, ascending
    pub fn select(&self, count: usize) -> Vec<usize> {
        (0..count).filter(|&i| self.shows(i, count)).collect()
    }
}

impl Default for LabelThinner {
    fn default() -> Self {
        Self::new(5)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Coordinate> {
        raw.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
    }

    #[test]
    fn test_scale_proportional() {
        assert_eq!(scale(10.0, 20.0, 200.0), 100.0);
        assert_eq!(scale(20.0, 20.0, 200.0), 200.0);
        assert_eq!(scale(5.0, 20.0, 200.0), 50.0);
    }

    #[test]
    fn test_domain_max_guards_degenerate_data() {
        assert_eq!(domain_max(&Dataset::default()), 1.0);
        assert_eq!(domain_max(&Dataset::from_pairs([("a", 0.0), ("b", 0.0)])), 1.0);
        assert_eq!(domain_max(&Dataset::from_pairs([("a", 3.0), ("b", 7.0)])), 7.0);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        let scale = LinearScale::new().domain(0.0, 20.0).range(200.0, 0.0);
        assert_eq!(scale.scale(0.0), 200.0);
        assert_eq!(scale.scale(20.0), 0.0);
        assert_eq!(scale.scale(5.0), 150.0);
    }

    #[test]
    fn test_linear_scale_zero_span_is_finite() {
        let scale = LinearScale::new().domain(0.0, 0.0).range(0.0, 100.0);
        assert!(scale.scale(0.0).is_finite());
    }

    #[test]
    fn test_band_scale() {
        let scale = BandScale::new(5).range(0.0, 100.0).padding(0.2, 0.1);
        let bw = scale.bandwidth();
        assert!(bw > 0.0);
        assert!(bw < 20.0);
        assert!(scale.scale(0) > 0.0);
        let last_end = scale.scale(4) + bw;
        assert!(last_end < 100.0 + 1e-9);
        assert!((scale.scale(1) - scale.scale(0) - scale.step()).abs() < 1e-9);
    }

    #[test]
    fn test_line_path_visits_every_point() {
        let points = pts(&[(0.0, 10.0), (50.0, 5.0), (100.0, 0.0)]);
        let path = line_path(&points).unwrap();
        assert_eq!(
            path,
            vec![
                PathCommand::MoveTo(points[0]),
                PathCommand::LineTo(points[1]),
                PathCommand::LineTo(points[2]),
            ]
        );
    }

    #[test]
    fn test_area_path_closes_on_baseline() {
        let points = pts(&[(0.0, 10.0), (100.0, 0.0)]);
        let path = area_path(&points, 50.0).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[2], PathCommand::LineTo(Coordinate::new(100.0, 50.0)));
        assert_eq!(path[3], PathCommand::LineTo(Coordinate::new(0.0, 50.0)));
        assert_eq!(path[4], PathCommand::ClosePath);
    }

    #[test]
    fn test_paths_reject_single_point() {
        let points = pts(&[(0.0, 0.0)]);
        let err = line_path(&points).unwrap_err();
        assert_eq!(err, InsufficientData { required: 2, actual: 1 });
        assert!(area_path(&[], 0.0).is_err());
    }

    #[test]
    fn test_svg_path_serialization() {
        let path = PathBuilder::new()
            .move_to(Coordinate::new(0.0, 0.0))
            .arc_to(10.0, true, false, Coordinate::new(5.5, 2.25))
            .line_to(Coordinate::new(100.0, 100.0))
            .close()
            .build();

        assert_eq!(
            to_svg_path(&path),
            "M0.00,0.00A10.00,10.00,0,1,0,5.50,2.25L100.00,100.00Z"
        );
    }

    #[test]
    fn test_label_thinner_keeps_endpoints() {
        let thinner = LabelThinner::default();
        for n in 1..=60 {
            let picked = thinner.select(n);
            assert_eq!(picked.first(), Some(&0), "n = {n}");
            assert_eq!(picked.last(), Some(&(n - 1)), "n = {n}");
            assert!(picked.len() <= 5, "n = {n} picked {picked:?}");
        }
    }

    #[test]
    fn test_label_thinner_stride() {
        let thinner = LabelThinner::default();
        assert_eq!(thinner.select(1), vec![0]);
        assert_eq!(thinner.select(0), Vec::<usize>::new());
        assert_eq!(thinner.select(4), vec![0, 1, 2, 3]);
        assert_eq!(thinner.select(10), vec![0, 3, 6, 9]);
        assert_eq!(thinner.select(20), vec![0, 5, 10, 15, 19]);
    }

    #[test]
    fn test_label_thinner_tiny_budget() {
        let thinner = LabelThinner::new(1);
        assert_eq!(thinner.select(3), vec![0, 2]);
        let thinner = LabelThinner::new(2);
        assert_eq!(thinner.select(7), vec![0, 6]);
    }
}
