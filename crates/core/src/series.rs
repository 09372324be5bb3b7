//! Time-series containers
//!
//! A series holds one point per calendar month, in order. A point's value
//! is `None` when the month produced no usable observation; gap filling
//! happens later, over the materialized series.

use serde::Serialize;

/// One month of a time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    /// Month label in `"YYYY-MM"` form.
    pub month: String,
    /// Aggregate value, or `None` when the month had no usable data.
    pub value: Option<f64>,
}

/// An ordered monthly series, materialized in full.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    pub fn new(points: Vec<TimeSeriesPoint>) -> Self {
        Self { points }
    }

    /// Build from parallel month/value vectors.
    pub fn from_parts(months: Vec<String>, values: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(months.len(), values.len());
        Self {
            points: months
                .into_iter()
                .zip(values)
                .map(|(month, value)| TimeSeriesPoint { month, value })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Month labels, in order.
    pub fn months(&self) -> Vec<String> {
        self.points.iter().map(|p| p.month.clone()).collect()
    }

    /// Raw values, in order, missing months as `None`.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }
}

impl IntoIterator for TimeSeries {
    type Item = TimeSeriesPoint;
    type IntoIter = std::vec::IntoIter<TimeSeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

/// A yearly aggregate, the input of trend fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyValue {
    pub year: i32,
    pub value: f64,
}

impl YearlyValue {
    pub fn new(year: i32, value: f64) -> Self {
        Self { year, value }
    }
}
