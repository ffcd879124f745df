//! Compact display formatting for metric values.

use crate::sample::MetricValue;

/// Round to one decimal place, halves away from zero.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a number compactly: `1.3M`, `2.4K`, `42`.
///
/// Values of a million or more are shown in millions, values of a thousand or
/// more in thousands, both with one decimal. Smaller values use the shortest
/// decimal rendering. A value that would round up to `1000.0K` is shown as
/// `1.0M`.
pub fn format_compact(value: f64) -> String {
    let thousands = round_one_decimal(value / 1_000.0);
    if value >= 1_000_000.0 || thousands >= 1_000.0 {
        format!("{:.1}M", round_one_decimal(value / 1_000_000.0))
    } else if value >= 1_000.0 {
        format!("{:.1}K", thousands)
    } else {
        format!("{}", value)
    }
}

/// Format a number compactly and append `unit` verbatim.
pub fn format_with_unit(value: f64, unit: Option<&str>) -> String {
    let mut text = format_compact(value);
    if let Some(unit) = unit {
        text.push_str(unit);
    }
    text
}

/// Format a gap percentage with an explicit sign and one decimal.
pub fn format_gap(gap_percent: f64) -> String {
    let rounded = round_one_decimal(gap_percent);
    if rounded > 0.0 {
        format!("+{:.1}%", rounded)
    } else if rounded < 0.0 {
        format!("{:.1}%", rounded)
    } else {
        "0.0%".to_string()
    }
}

impl MetricValue {
    /// Display form of the value: pre-formatted strings pass through unchanged.
    pub fn display_compact(&self, unit: Option<&str>) -> String {
        match self {
            MetricValue::Number(n) => format_with_unit(*n, unit),
            MetricValue::Text(text) => text.clone(),
        }
    }
}
