//! Domain aggregates returned by the course API and their chart datasets

use crate::{colors, DataPoint, Dataset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Star rating counts, index 0 = one star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub counts: [u64; 5],
}

impl RatingDistribution {
    pub fn new(counts: [u64; 5]) -> Self {
        Self { counts }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Mean star rating, `None` when nobody has rated yet
    pub fn average(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: u64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64 + 1) * count)
            .sum();
        Some(weighted as f64 / total as f64)
    }

    /// One point per star level, ascending.
    pub fn to_dataset(&self) -> Dataset {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| DataPoint::new(format!("{}★", i + 1), count as f64))
            .collect()
    }
}

/// Yes/no answer counts for a single question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YesNoDistribution {
    pub yes: u64,
    pub no: u64,
}

impl YesNoDistribution {
    pub fn new(yes: u64, no: u64) -> Self {
        Self { yes, no }
    }

    pub fn to_dataset(&self) -> Dataset {
        Dataset::new(vec![
            DataPoint::new("Yes", self.yes as f64).with_color(colors::POSITIVE),
            DataPoint::new("No", self.no as f64).with_color(colors::NEGATIVE),
        ])
    }
}

// ============================================================================
// API PAYLOAD
// ============================================================================

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed chart payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Any of the chart payload shapes the API layer delivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartPayload {
    Points(Vec<DataPoint>),
    Rating(RatingDistribution),
    YesNo(YesNoDistribution),
}

impl ChartPayload {
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_dataset(self) -> Dataset {
        match self {
            Self::Points(points) => Dataset::new(points),
            Self::Rating(rating) => rating.to_dataset(),
            Self::YesNo(answers) => answers.to_dataset(),
        }
    }
}

impl Dataset {
    /// Decode any supported payload shape straight into a dataset.
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        ChartPayload::from_json(json).map(ChartPayload::into_dataset)
    }
}
