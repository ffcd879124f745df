use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics};

use super::{ensure_finite, StatsError};
use crate::sample::PeriodSample;

/// Descriptive statistics for a velocity series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityResult {
    pub mean: f64,
    /// Population standard deviation (divisor `n`).
    pub standard_deviation: f64,
    /// Standard deviation as a percentage of the mean.
    pub coefficient_of_variation: f64,
    pub median: f64,
    pub is_unstable: bool,
    /// Periods deviating from the mean by more than the outlier multiple,
    /// in input order.
    pub outliers: Vec<PeriodSample>,
}

/// Classifies a velocity series as stable or unstable and finds outlier periods.
///
/// A series is unstable when its coefficient of variation exceeds
/// `cv_threshold` percent. A period is an outlier when its absolute deviation
/// from the mean exceeds `outlier_sigma` standard deviations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityAnalyzer {
    pub cv_threshold: f64,
    pub outlier_sigma: f64,
}

impl Default for StabilityAnalyzer {
    fn default() -> Self {
        Self {
            cv_threshold: 30.0,
            outlier_sigma: 1.5,
        }
    }
}

impl StabilityAnalyzer {
    /// Create an analyzer with custom constants.
    ///
    /// # Errors
    /// Returns [`StatsError::NonFinite`] if either constant is NaN or infinite.
    pub fn new(cv_threshold: f64, outlier_sigma: f64) -> Result<Self, StatsError> {
        ensure_finite(cv_threshold, "cv_threshold")?;
        ensure_finite(outlier_sigma, "outlier_sigma")?;
        Ok(Self {
            cv_threshold,
            outlier_sigma,
        })
    }

    /// Analyze a series in the order given. The input is not reordered.
    pub fn analyze(&self, series: &[PeriodSample]) -> Result<StabilityResult, StatsError> {
        if series.is_empty() {
            return Err(StatsError::EmptySeries);
        }
        for sample in series {
            ensure_finite(sample.count, &sample.period)?;
        }

        let n = series.len() as f64;
        let mean = series.iter().map(|s| s.count).sum::<f64>() / n;
        ensure_finite(mean, "mean")?;
        if mean == 0.0 {
            return Err(StatsError::DivisionUndefined("mean"));
        }

        let variance = series
            .iter()
            .map(|s| {
                let diff = s.count - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        ensure_finite(variance, "variance")?;
        let standard_deviation = variance.sqrt();
        let coefficient_of_variation = (standard_deviation / mean) * 100.0;
        ensure_finite(coefficient_of_variation, "coefficient_of_variation")?;

        let cutoff = standard_deviation * self.outlier_sigma;
        let outliers: Vec<PeriodSample> = series
            .iter()
            .filter(|s| (s.count - mean).abs() > cutoff)
            .cloned()
            .collect();

        let mut data = Data::new(series.iter().map(|s| s.count).collect::<Vec<f64>>());
        let median = data.median();

        let is_unstable = coefficient_of_variation > self.cv_threshold;

        tracing::debug!(
            periods = series.len(),
            mean,
            standard_deviation,
            coefficient_of_variation,
            outliers = outliers.len(),
            is_unstable,
            "analyzed velocity series"
        );

        Ok(StabilityResult {
            mean,
            standard_deviation,
            coefficient_of_variation,
            median,
            is_unstable,
            outliers,
        })
    }
}

/// Analyze a series with the default thresholds (CV > 30%, 1.5 sigma outliers).
pub fn analyze_stability(series: &[PeriodSample]) -> Result<StabilityResult, StatsError> {
    StabilityAnalyzer::default().analyze(series)
}
