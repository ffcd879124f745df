use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ensure_finite, StatsError};
use crate::sample::{MetricSample, MetricValue};

/// Severity band of a gap against its reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Outperforming the reference.
    Surplus,
    Balanced,
    DeficitModerate,
    DeficitSevere,
}

impl Tier {
    /// The label used in reports and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Surplus => "surplus",
            Tier::Balanced => "balanced",
            Tier::DeficitModerate => "deficit-moderate",
            Tier::DeficitSevere => "deficit-severe",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold table for classifying a gap percentage into a [`Tier`].
///
/// Bands are evaluated top-down and the first match wins:
///
/// | gap                                   | tier             |
/// |---------------------------------------|------------------|
/// | `> surplus_above`                     | surplus          |
/// | `>= balanced_floor`                   | balanced         |
/// | `>= severe_below`                     | deficit-moderate |
/// | otherwise                             | deficit-severe   |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub surplus_above: f64,
    pub balanced_floor: f64,
    pub severe_below: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            surplus_above: 15.0,
            balanced_floor: -15.0,
            severe_below: -40.0,
        }
    }
}

impl TierThresholds {
    /// Build a threshold table, rejecting bands that are out of order.
    pub fn new(
        surplus_above: f64,
        balanced_floor: f64,
        severe_below: f64,
    ) -> Result<Self, StatsError> {
        let thresholds = Self {
            surplus_above,
            balanced_floor,
            severe_below,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Check that every bound is finite and the bands are ordered.
    pub fn validate(&self) -> Result<(), StatsError> {
        ensure_finite(self.surplus_above, "surplus_above")?;
        ensure_finite(self.balanced_floor, "balanced_floor")?;
        ensure_finite(self.severe_below, "severe_below")?;

        if self.severe_below > self.balanced_floor || self.balanced_floor > self.surplus_above {
            return Err(StatsError::InvalidThresholds(format!(
                "expected severe_below ({}) <= balanced_floor ({}) <= surplus_above ({})",
                self.severe_below, self.balanced_floor, self.surplus_above
            )));
        }
        Ok(())
    }

    /// Classify a gap percentage.
    pub fn classify(&self, gap_percent: f64) -> Tier {
        if gap_percent > self.surplus_above {
            Tier::Surplus
        } else if gap_percent >= self.balanced_floor {
            Tier::Balanced
        } else if gap_percent >= self.severe_below {
            Tier::DeficitModerate
        } else {
            Tier::DeficitSevere
        }
    }
}

/// Signed percentage gap of a subject value against its reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapResult {
    /// `(current - reference) / reference * 100`, unrounded.
    pub gap_percent: f64,
    pub tier: Tier,
}

/// Computes gaps and classifies them against a threshold table.
#[derive(Debug, Clone, Default)]
pub struct MetricComparator {
    thresholds: TierThresholds,
}

impl MetricComparator {
    /// Create a comparator with a custom threshold table.
    pub fn new(thresholds: TierThresholds) -> Result<Self, StatsError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &TierThresholds {
        &self.thresholds
    }

    /// Compare `current` against `reference`.
    ///
    /// Fails with [`StatsError::DivisionUndefined`] when `reference` is zero.
    pub fn compare(&self, current: f64, reference: f64) -> Result<GapResult, StatsError> {
        ensure_finite(current, "current")?;
        ensure_finite(reference, "reference")?;

        if reference == 0.0 {
            return Err(StatsError::DivisionUndefined("reference"));
        }

        let gap_percent = ((current - reference) / reference) * 100.0;
        ensure_finite(gap_percent, "gap_percent")?;
        let tier = self.thresholds.classify(gap_percent);

        tracing::debug!(current, reference, gap_percent, %tier, "compared metric");

        Ok(GapResult { gap_percent, tier })
    }

    /// Compare a sample, failing if either side is a pre-formatted string.
    pub fn compare_sample(&self, sample: &MetricSample) -> Result<GapResult, StatsError> {
        match (&sample.current, &sample.reference) {
            (MetricValue::Number(current), MetricValue::Number(reference)) => {
                self.compare(*current, *reference)
            }
            _ => Err(StatsError::NonNumeric {
                label: sample.label.clone(),
            }),
        }
    }
}

/// Compare `current` against `reference` using the default threshold table.
pub fn compare_gap(current: f64, reference: f64) -> Result<GapResult, StatsError> {
    MetricComparator::default().compare(current, reference)
}
