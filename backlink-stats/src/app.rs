//! Turns a parsed command into a dataset and renders its report.

use anyhow::{bail, Result};
use backlink_stats_core::{
    DashboardReport, Dataset, JsonReporter, MetricSample, NamedSeries, Reporter, TerminalReporter,
};
use std::io::Write;

use crate::cli::Command;
use crate::config::{Config, OutputFormat};
use crate::dataset::{demo_dataset, load_dataset, series_from_counts};

/// Label used for values passed directly on the command line.
const INPUT_LABEL: &str = "input";

/// Build the dataset a reporting command operates on.
///
/// # Errors
///
/// Fails for `serve`, which does not produce a report, and when a dataset
/// file cannot be loaded.
pub fn dataset_for(command: &Command) -> Result<Dataset> {
    match command {
        Command::Report { dataset, .. } => load_dataset(dataset),
        Command::Demo { .. } => Ok(demo_dataset()),
        Command::Gap {
            current, reference, ..
        } => Ok(Dataset {
            metrics: vec![MetricSample::new(INPUT_LABEL, *current, *reference)],
            velocity: Vec::new(),
        }),
        Command::Stability { counts, .. } => Ok(Dataset {
            metrics: Vec::new(),
            velocity: vec![NamedSeries {
                name: INPUT_LABEL.to_string(),
                series: series_from_counts(counts),
            }],
        }),
        Command::Serve { .. } => bail!("serve does not produce a report"),
    }
}

/// Pick the reporter described by `[output]`.
pub fn reporter_for(config: &Config) -> Box<dyn Reporter> {
    match config.output.format {
        OutputFormat::Json => Box::new(JsonReporter),
        OutputFormat::Terminal if config.output.color => Box::new(TerminalReporter::new()),
        OutputFormat::Terminal => Box::new(TerminalReporter::without_colors()),
    }
}

/// Compute `dataset` with the configured thresholds and write the report.
pub fn render_report(dataset: &Dataset, config: &Config, writer: &mut dyn Write) -> Result<()> {
    let comparator = config.comparator()?;
    let analyzer = config.analyzer()?;

    let report = DashboardReport::build(dataset, &comparator, &analyzer);
    reporter_for(config).write_report(&report, writer)?;

    Ok(())
}
