use std::io::{self, Write};

use colored::{ColoredString, Colorize};

use super::{DashboardReport, MetricComparison, ReportError, Reporter, VelocityAnalysis};
use crate::format::{format_compact, format_gap};
use crate::stats::Tier;

const RULE_WIDTH: usize = 96;
const NOT_AVAILABLE: &str = "N/A";

/// A reporter that prints gap tables and velocity statistics to the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalReporter {
    /// Whether to use colors in output.
    use_colors: bool,
}

impl TerminalReporter {
    /// Create a new terminal reporter with colors enabled.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    fn paint(&self, text: String, style: fn(ColoredString) -> ColoredString) -> String {
        if self.use_colors {
            style(text.as_str().normal()).to_string()
        } else {
            text
        }
    }

    fn tier_style(tier: Tier) -> fn(ColoredString) -> ColoredString {
        match tier {
            Tier::Surplus => |s: ColoredString| s.green(),
            Tier::Balanced => |s: ColoredString| s.blue(),
            Tier::DeficitModerate => |s: ColoredString| s.yellow(),
            Tier::DeficitSevere => |s: ColoredString| s.red().bold(),
        }
    }

    /// Truncate long labels so columns stay aligned.
    fn fit(label: &str, width: usize) -> String {
        if label.chars().count() > width {
            let cut: String = label.chars().take(width - 3).collect();
            format!("{}...", cut)
        } else {
            label.to_string()
        }
    }

    fn print_heading(&self, writer: &mut dyn Write, title: &str) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", self.paint(title.to_string(), |s| s.bold()))?;
        writeln!(writer, "{}", "=".repeat(RULE_WIDTH))
    }

    fn print_gap_header(&self, writer: &mut dyn Write) -> io::Result<()> {
        let header = format!(
            "{:<36} {:>14} {:>14} {:>10} {:>18}",
            "Metric", "Current", "Reference", "Gap", "Tier"
        );
        writeln!(writer, "{}", self.paint(header, |s| s.bold()))?;
        writeln!(writer, "{}", "-".repeat(RULE_WIDTH))
    }

    fn print_gap_row(&self, writer: &mut dyn Write, row: &MetricComparison) -> io::Result<()> {
        let unit = row.unit.as_deref();
        let current = row.current.display_compact(unit);
        let reference = row.reference.display_compact(unit);

        let (gap, tier) = match &row.gap {
            Some(result) => {
                let style = Self::tier_style(result.tier);
                (
                    self.paint(format!("{:>10}", format_gap(result.gap_percent)), style),
                    self.paint(format!("{:>18}", result.tier.as_str()), style),
                )
            }
            None => (
                format!("{:>10}", NOT_AVAILABLE),
                format!("{:>18}", NOT_AVAILABLE),
            ),
        };

        writeln!(
            writer,
            "{:<36} {:>14} {:>14} {} {}",
            Self::fit(&row.label, 36),
            current,
            reference,
            gap,
            tier
        )
    }

    fn print_velocity_header(&self, writer: &mut dyn Write) -> io::Result<()> {
        let header = format!(
            "{:<30} {:>8} {:>10} {:>10} {:>8} {:>10}  {}",
            "Series", "Mean", "Std dev", "CV", "Median", "Status", "Outliers"
        );
        writeln!(writer, "{}", self.paint(header, |s| s.bold()))?;
        writeln!(writer, "{}", "-".repeat(RULE_WIDTH))
    }

    fn print_velocity_row(
        &self,
        writer: &mut dyn Write,
        row: &VelocityAnalysis,
    ) -> io::Result<()> {
        let name = Self::fit(&row.name, 30);

        let Some(stability) = &row.stability else {
            return writeln!(
                writer,
                "{:<30} {:>8} {:>10} {:>10} {:>8} {:>10}",
                name, NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE
            );
        };

        let status = if stability.is_unstable {
            self.paint(format!("{:>10}", "unstable"), |s| s.red().bold())
        } else {
            self.paint(format!("{:>10}", "stable"), |s| s.green())
        };

        let outliers = if stability.outliers.is_empty() {
            "-".to_string()
        } else {
            stability
                .outliers
                .iter()
                .map(|o| format!("{} ({})", o.period, format_compact(o.count)))
                .collect::<Vec<_>>()
                .join(", ")
        };

        writeln!(
            writer,
            "{:<30} {:>8.1} {:>10.2} {:>9.1}% {:>8} {}  {}",
            name,
            stability.mean,
            stability.standard_deviation,
            stability.coefficient_of_variation,
            format_compact(stability.median),
            status,
            outliers
        )
    }

    fn print_summary(&self, writer: &mut dyn Write, report: &DashboardReport) -> io::Result<()> {
        let mut counts = [0usize; 4];
        let mut unavailable = 0;
        for row in &report.comparisons {
            match row.gap.map(|g| g.tier) {
                Some(Tier::Surplus) => counts[0] += 1,
                Some(Tier::Balanced) => counts[1] += 1,
                Some(Tier::DeficitModerate) => counts[2] += 1,
                Some(Tier::DeficitSevere) => counts[3] += 1,
                None => unavailable += 1,
            }
        }
        let unstable = report
            .velocity
            .iter()
            .filter(|v| v.stability.as_ref().is_some_and(|s| s.is_unstable))
            .count();

        writeln!(writer)?;
        writeln!(writer, "{}", "-".repeat(RULE_WIDTH))?;
        write!(writer, "{} ", self.paint("Summary:".to_string(), |s| s.bold()))?;
        writeln!(
            writer,
            "{}, {}, {}, {}, {} unavailable; {} of {} series unstable",
            self.paint(format!("{} surplus", counts[0]), Self::tier_style(Tier::Surplus)),
            self.paint(format!("{} balanced", counts[1]), Self::tier_style(Tier::Balanced)),
            self.paint(
                format!("{} deficit-moderate", counts[2]),
                Self::tier_style(Tier::DeficitModerate)
            ),
            self.paint(
                format!("{} deficit-severe", counts[3]),
                Self::tier_style(Tier::DeficitSevere)
            ),
            unavailable,
            unstable,
            report.velocity.len()
        )?;
        writeln!(writer)
    }
}

impl Reporter for TerminalReporter {
    fn write_report(
        &self,
        report: &DashboardReport,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        if !report.comparisons.is_empty() {
            self.print_heading(writer, "Metric gaps")?;
            self.print_gap_header(writer)?;
            for row in &report.comparisons {
                self.print_gap_row(writer, row)?;
            }
        }

        if !report.velocity.is_empty() {
            self.print_heading(writer, "Link velocity")?;
            self.print_velocity_header(writer)?;
            for row in &report.velocity {
                self.print_velocity_row(writer, row)?;
            }
        }

        self.print_summary(writer, report)?;
        Ok(())
    }
}
