//! Chart input records and immutable dataset snapshots

use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ============================================================================
// DATA POINT
// ============================================================================

/// One labelled value as delivered by the API layer.
///
/// Values are expected to be non-negative; nothing enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl<L: Into<String>> From<(L, f64)> for DataPoint {
    fn from((label, value): (L, f64)) -> Self {
        Self::new(label, value)
    }
}

// ============================================================================
// DATASET
// ============================================================================

/// Ordered, immutable snapshot of data points.
///
/// Clones share the same allocation, so "did the dataset change" is a
/// pointer comparison ([`Dataset::same_snapshot`]) rather than a deep one.
/// Order is rendering order: x order for bars and lines, wedge order for donuts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<DataPoint>", into = "Vec<DataPoint>")]
pub struct Dataset {
    points: Arc<[DataPoint]>,
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self {
            points: Arc::from(points),
        }
    }

    /// Build a dataset from `(label, value)` pairs.
    pub fn from_pairs<L: Into<String>>(pairs: impl IntoIterator<Item = (L, f64)>) -> Self {
        Self::new(pairs.into_iter().map(DataPoint::from).collect())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    /// Largest value, or `None` for an empty dataset
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// True when both handles point at the same snapshot.
    pub fn same_snapshot(&self, other: &Dataset) -> bool {
        Arc::ptr_eq(&self.points, &other.points)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<DataPoint>> for Dataset {
    fn from(points: Vec<DataPoint>) -> Self {
        Self::new(points)
    }
}

impl From<Dataset> for Vec<DataPoint> {
    fn from(dataset: Dataset) -> Self {
        dataset.points.to_vec()
    }
}

impl FromIterator<DataPoint> for Dataset {
    fn from_iter<I: IntoIterator<Item = DataPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_snapshot() {
        let a = Dataset::from_pairs([("a", 1.0), ("b", 2.0)]);
        let b = a.clone();
        assert!(a.same_snapshot(&b));

        let c = Dataset::from_pairs([("a", 1.0), ("b", 2.0)]);
        assert_eq!(a, c);
        assert!(!a.same_snapshot(&c));
    }

    #[test]
    fn test_max_and_total() {
        let data = Dataset::from_pairs([("a", 10.0), ("b", 20.0), ("c", 5.0)]);
        assert_eq!(data.max_value(), Some(20.0));
        assert_eq!(data.total(), 35.0);

        let empty = Dataset::default();
        assert_eq!(empty.max_value(), None);
        assert_eq!(empty.total(), 0.0);
    }

    #[test]
    fn test_deserialize_from_api_array() {
        let json = r##"[{"label":"a","value":10},{"label":"b","value":2.5,"color":"#fff"}]"##;
        let data: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.get(1).unwrap().color.as_deref(), Some("#fff"));
        assert_eq!(data.get(0).unwrap().color, None);
    }

    #[test]
    fn test_serialize_skips_missing_color() {
        let data = Dataset::from_pairs([("a", 1.0)]);
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"[{"label":"a","value":1.0}]"#);
    }
}
