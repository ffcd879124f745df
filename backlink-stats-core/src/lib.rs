//! Core types and computations for backlink-stats.
//!
//! This crate holds the arithmetic behind a backlink-analysis dashboard:
//! percentage gaps against a reference value with severity tiers, stability
//! statistics for link-acquisition velocity, and compact number formatting.
//! Everything here is a pure function of its inputs.

pub mod format;
pub mod protocol;
pub mod report;
pub mod sample;
pub mod stats;

// Re-export main types for convenience
pub use format::{format_compact, format_gap, format_with_unit};
pub use report::{
    DashboardReport, JsonReporter, MetricComparison, ReportError, Reporter, TerminalReporter,
    VelocityAnalysis,
};
pub use sample::{Dataset, MetricSample, MetricValue, NamedSeries, PeriodSample};
pub use stats::{
    analyze_stability, compare_gap, GapResult, MetricComparator, StabilityAnalyzer,
    StabilityResult, StatsError, Tier, TierThresholds,
};
