// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw chart data as seen by a time axis.

use core::fmt;

use chronaxis_time::Instant;
use serde::{Deserialize, Serialize};

/// A raw time value before resolution.
///
/// JSON numbers become [`TimeValue::Number`] (Unix milliseconds) and strings
/// become [`TimeValue::Text`]. [`TimeValue::Instant`] carries an already
/// resolved value and is only constructed from Rust.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Milliseconds since the Unix epoch, or input for a custom parser.
    Number(f64),
    /// Text to parse.
    Text(String),
    /// A native instant.
    #[serde(skip_deserializing)]
    Instant(Instant),
}

impl From<&str> for TimeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for TimeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for TimeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Instant> for TimeValue {
    fn from(value: Instant) -> Self {
        Self::Instant(value)
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Instant(t) => write!(f, "{t}"),
        }
    }
}

/// A data point on a time axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Position along the time axis.
    pub x: TimeValue,
    /// Value on the other axis. Not used by time scales.
    #[serde(default)]
    pub y: Option<f64>,
}

impl TimePoint {
    /// Creates a point.
    pub fn new(x: impl Into<TimeValue>, y: f64) -> Self {
        Self {
            x: x.into(),
            y: Some(y),
        }
    }
}

/// The values of one dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetValues {
    /// Plain values; their time positions come from the shared labels.
    Values(Vec<Option<f64>>),
    /// Points that carry their own time position.
    Points(Vec<TimePoint>),
}

impl Default for DatasetValues {
    fn default() -> Self {
        Self::Values(Vec::new())
    }
}

/// One dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Values or points.
    #[serde(default)]
    pub data: DatasetValues,
    /// Hidden datasets do not widen the axis range.
    #[serde(default)]
    pub hidden: bool,
}

impl Dataset {
    /// A dataset of plain values aligned with the chart labels.
    pub fn values(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            data: DatasetValues::Values(values.into_iter().map(Some).collect()),
            hidden: false,
        }
    }

    /// A dataset of points.
    pub fn points(points: impl IntoIterator<Item = TimePoint>) -> Self {
        Self {
            data: DatasetValues::Points(points.into_iter().collect()),
            hidden: false,
        }
    }

    /// Marks the dataset hidden.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

/// Read access to the data an axis spans.
///
/// An axis either reads the shared `labels` (a category-style x axis) or the
/// `x` of each point dataset. Datasets without points fall back to the labels.
pub trait TimeData {
    /// Labels shared by every non-point dataset.
    fn labels(&self) -> &[TimeValue];

    /// Number of datasets.
    fn dataset_count(&self) -> usize;

    /// The points of `dataset`, or `None` when it positions values by label.
    fn points(&self, dataset: usize) -> Option<&[TimePoint]>;

    /// Whether `dataset` contributes to the axis range.
    fn is_dataset_visible(&self, dataset: usize) -> bool {
        let _ = dataset;
        true
    }
}

/// Owned chart data: labels plus datasets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Shared labels.
    #[serde(default)]
    pub labels: Vec<TimeValue>,
    /// Datasets.
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    /// Chart data with only labels.
    pub fn from_labels<T: Into<TimeValue>>(labels: impl IntoIterator<Item = T>) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            datasets: Vec::new(),
        }
    }

    /// Adds a dataset.
    #[must_use]
    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }
}

impl TimeData for ChartData {
    fn labels(&self) -> &[TimeValue] {
        &self.labels
    }

    fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    fn points(&self, dataset: usize) -> Option<&[TimePoint]> {
        match &self.datasets.get(dataset)?.data {
            DatasetValues::Points(points) => Some(points),
            DatasetValues::Values(_) => None,
        }
    }

    fn is_dataset_visible(&self, dataset: usize) -> bool {
        self.datasets.get(dataset).is_some_and(|d| !d.hidden)
    }
}
