//! Input records for gap comparisons and velocity analysis.

use serde::{Deserialize, Serialize};

/// A metric value as supplied by the data source.
///
/// Most values are plain numbers, but some sources hand over pre-formatted
/// strings (ratios such as `"1:3"`, or already-abbreviated counts). Those are
/// carried through untouched and never take part in arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// The numeric value, if this is not an opaque string.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

/// One row of a comparison table: a subject metric against its reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub label: String,
    pub current: MetricValue,
    pub reference: MetricValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl MetricSample {
    /// Create a sample without a unit.
    pub fn new(
        label: impl Into<String>,
        current: impl Into<MetricValue>,
        reference: impl Into<MetricValue>,
    ) -> Self {
        Self {
            label: label.into(),
            current: current.into(),
            reference: reference.into(),
            unit: None,
        }
    }

    /// Attach a display unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// The count observed in a single period (month, week, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSample {
    pub period: String,
    pub count: f64,
}

impl PeriodSample {
    pub fn new(period: impl Into<String>, count: f64) -> Self {
        Self {
            period: period.into(),
            count,
        }
    }
}

/// A titled velocity series, one chart on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    pub series: Vec<PeriodSample>,
}

/// Everything a dashboard needs computed: comparison rows and velocity series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub metrics: Vec<MetricSample>,
    pub velocity: Vec<NamedSeries>,
}
