//! Dataset loading and the built-in demo dataset.

use anyhow::{Context, Result};
use backlink_stats_core::{Dataset, MetricSample, NamedSeries, PeriodSample};
use std::path::Path;

/// Load a JSON dataset from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid dataset.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    let dataset: Dataset = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse dataset: {}", path.display()))?;

    tracing::debug!(
        metrics = dataset.metrics.len(),
        series = dataset.velocity.len(),
        "loaded dataset from {}",
        path.display()
    );

    Ok(dataset)
}

/// Label raw counts as periods `P1..Pn`, preserving order.
pub fn series_from_counts(counts: &[f64]) -> Vec<PeriodSample> {
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| PeriodSample::new(format!("P{}", i + 1), count))
        .collect()
}

fn months(counts: &[f64]) -> Vec<PeriodSample> {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    counts
        .iter()
        .zip(MONTHS.iter().cycle())
        .map(|(&count, month)| PeriodSample::new(*month, count))
        .collect()
}

/// A site-versus-competitors snapshot resembling a typical backlink audit.
pub fn demo_dataset() -> Dataset {
    Dataset {
        metrics: vec![
            MetricSample::new("Referring domains", 145.0, 285.0),
            MetricSample::new("Domain rating", 42.0, 58.0),
            MetricSample::new("Trust flow", 78.0, 75.0),
            MetricSample::new("Total backlinks", 2_400.0, 1_850.0),
            MetricSample::new("Dofollow share", 62.0, 70.0).with_unit("%"),
            MetricSample::new("Organic traffic", 1_250_000.0, 940_000.0),
            MetricSample::new("Anchor text ratio", "1:3", "1:5"),
        ],
        velocity: vec![
            NamedSeries {
                name: "New referring domains".to_string(),
                series: months(&[12.0, 8.0, 14.0, 18.0, 38.0, 16.0, 12.0]),
            },
            NamedSeries {
                name: "New backlinks".to_string(),
                series: months(&[210.0, 198.0, 225.0, 205.0, 231.0, 219.0]),
            },
            NamedSeries {
                name: "Competitor median".to_string(),
                series: months(&[40.0, 42.0, 38.0, 41.0, 39.0, 40.0]),
            },
        ],
    }
}
