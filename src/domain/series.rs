// Series domain models
use super::sample::NormalizedSample;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Samples in file line order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series(Vec<NormalizedSample>);

impl Series {
    pub fn new(samples: Vec<NormalizedSample>) -> Self {
        Self(samples)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&NormalizedSample> {
        self.0.last()
    }

    pub fn samples(&self) -> &[NormalizedSample] {
        &self.0
    }
}

impl FromIterator<NormalizedSample> for Series {
    fn from_iter<I: IntoIterator<Item = NormalizedSample>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Latest reading shown at the top of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Summary {
    Absent,
    Latest {
        timestamp: DateTime<Utc>,
        percentage: f64,
    },
}

impl Summary {
    /// Takes the last line of the file, not the greatest timestamp.
    /// The sensor server appends in wall-clock order, so the two only differ
    /// if the host clock stepped backwards.
    pub fn from_series(series: &Series) -> Self {
        match series.last() {
            Some(sample) => Summary::Latest {
                timestamp: sample.timestamp,
                percentage: sample.percentage,
            },
            None => Summary::Absent,
        }
    }
}

/// Counters describing one pass over the data file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub source_available: bool,
    pub lines_read: usize,
    pub samples: usize,
    pub blank_lines: usize,
    pub skipped_lines: usize,
}

impl LoadReport {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Result of loading the data file once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesLoad {
    pub series: Series,
    pub report: LoadReport,
}
