//! Request and response bodies for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::sample::PeriodSample;
use crate::stats::{GapResult, StatsError, Tier};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    /// Create a healthy response.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Request to compare a subject value against its reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapRequest {
    pub current: f64,
    pub reference: f64,
}

/// Computed gap, with the one-decimal display form alongside the raw value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapResponse {
    pub gap_percent: f64,
    pub tier: Tier,
    pub display: String,
}

impl From<GapResult> for GapResponse {
    fn from(result: GapResult) -> Self {
        Self {
            gap_percent: result.gap_percent,
            tier: result.tier,
            display: crate::format::format_gap(result.gap_percent),
        }
    }
}

/// Request to analyze a velocity series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StabilityRequest {
    pub series: Vec<PeriodSample>,
}

/// Request to format a value compactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatRequest {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatResponse {
    pub text: String,
}

/// Body returned when a statistic cannot be computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl From<&StatsError> for ErrorResponse {
    fn from(err: &StatsError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind().to_string(),
        }
    }
}
