//! backlink-stats: gap and velocity-stability reports for backlink analysis
//!
//! This library wires the core computations to a CLI: configuration
//! loading, dataset loading and report rendering.

pub mod app;
pub mod cli;
pub mod config;
pub mod dataset;

// Re-export core types for convenience
pub use backlink_stats_core::protocol;
pub use backlink_stats_core::{
    analyze_stability, compare_gap, format_compact, DashboardReport, Dataset, GapResult,
    JsonReporter, MetricComparator, MetricSample, MetricValue, NamedSeries, PeriodSample,
    ReportError, Reporter, StabilityAnalyzer, StabilityResult, StatsError, TerminalReporter, Tier,
    TierThresholds,
};

// Re-export main types from this crate
pub use app::{dataset_for, render_report, reporter_for};
pub use cli::{Cli, Command, OutputArgs};
pub use config::{Config, OutputFormat};
pub use dataset::{demo_dataset, load_dataset, series_from_counts};
