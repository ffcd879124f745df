use std::io::Write;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sample::{Dataset, MetricSample, MetricValue, PeriodSample};
use crate::stats::{GapResult, MetricComparator, StabilityAnalyzer, StabilityResult, StatsError};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A comparison-table row with its computed gap.
///
/// `gap` is `None` when the gap could not be computed; `error` then says why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub label: String,
    pub current: MetricValue,
    pub reference: MetricValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub gap: Option<GapResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A velocity series with its stability statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityAnalysis {
    pub name: String,
    pub series: Vec<PeriodSample>,
    pub stability: Option<StabilityResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The computed records behind one dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub comparisons: Vec<MetricComparison>,
    pub velocity: Vec<VelocityAnalysis>,
}

impl DashboardReport {
    /// Compute every row of `dataset`.
    ///
    /// Rows that cannot be computed are kept with the error recorded, so a
    /// presenter can render a fallback in place.
    pub fn build(
        dataset: &Dataset,
        comparator: &MetricComparator,
        analyzer: &StabilityAnalyzer,
    ) -> Self {
        let comparisons = dataset
            .metrics
            .iter()
            .map(|sample| compare_row(sample, comparator))
            .collect();

        let velocity = dataset
            .velocity
            .iter()
            .map(|named| {
                let (stability, error) = split(analyzer.analyze(&named.series), &named.name);
                VelocityAnalysis {
                    name: named.name.clone(),
                    series: named.series.clone(),
                    stability,
                    error,
                }
            })
            .collect();

        Self {
            comparisons,
            velocity,
        }
    }
}

fn compare_row(sample: &MetricSample, comparator: &MetricComparator) -> MetricComparison {
    let (gap, error) = split(comparator.compare_sample(sample), &sample.label);
    MetricComparison {
        label: sample.label.clone(),
        current: sample.current.clone(),
        reference: sample.reference.clone(),
        unit: sample.unit.clone(),
        gap,
        error,
    }
}

fn split<T>(result: Result<T, StatsError>, row: &str) -> (Option<T>, Option<String>) {
    match result {
        Ok(value) => (Some(value), None),
        Err(err) => {
            tracing::warn!(row, kind = err.kind(), "{}", err);
            (None, Some(err.to_string()))
        }
    }
}

/// Renders a [`DashboardReport`].
pub trait Reporter: Send + Sync {
    fn write_report(
        &self,
        report: &DashboardReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError>;
}

/// Renders the report as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn write_report(
        &self,
        report: &DashboardReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut *writer, report)?;
        writeln!(writer)?;
        Ok(())
    }
}

mod terminal;
pub use terminal::TerminalReporter;
