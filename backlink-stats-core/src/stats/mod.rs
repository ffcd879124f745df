use thiserror::Error;

/// Errors raised when a statistic cannot be computed from its inputs.
///
/// None of these are fatal; callers are expected to render a fallback
/// (for example "N/A") for the affected row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// A ratio was requested against a zero denominator.
    #[error("Division undefined: {0} is zero")]
    DivisionUndefined(&'static str),

    /// Stability analysis was invoked with no data points.
    #[error("Series is empty")]
    EmptySeries,

    /// An input was NaN or infinite.
    #[error("Non-finite value for {0}")]
    NonFinite(String),

    /// A pre-formatted string was supplied where a number is required.
    #[error("Metric '{label}' is not numeric")]
    NonNumeric { label: String },

    /// A threshold table whose bands overlap or are out of order.
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),
}

impl StatsError {
    /// Stable machine-readable identifier for the error.
    pub fn kind(&self) -> &'static str {
        match self {
            StatsError::DivisionUndefined(_) => "division-undefined",
            StatsError::EmptySeries => "empty-series",
            StatsError::NonFinite(_) => "non-finite",
            StatsError::NonNumeric { .. } => "non-numeric",
            StatsError::InvalidThresholds(_) => "invalid-thresholds",
        }
    }
}

fn ensure_finite(value: f64, what: &str) -> Result<(), StatsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StatsError::NonFinite(what.to_string()))
    }
}

mod gap;
mod stability;

pub use gap::{compare_gap, GapResult, MetricComparator, Tier, TierThresholds};
pub use stability::{analyze_stability, StabilityAnalyzer, StabilityResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            StatsError::DivisionUndefined("reference").kind(),
            "division-undefined"
        );
        assert_eq!(StatsError::EmptySeries.kind(), "empty-series");
        assert_eq!(StatsError::NonFinite("count".into()).kind(), "non-finite");
        assert_eq!(
            StatsError::NonNumeric {
                label: "x".into()
            }
            .kind(),
            "non-numeric"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StatsError::DivisionUndefined("mean").to_string(),
            "Division undefined: mean is zero"
        );
        assert_eq!(
            StatsError::NonNumeric {
                label: "Anchor ratio".into()
            }
            .to_string(),
            "Metric 'Anchor ratio' is not numeric"
        );
    }
}
