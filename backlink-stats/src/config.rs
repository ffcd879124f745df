//! Configuration loading for backlink-stats.
//!
//! Supports loading configuration from TOML files, with defaults for every
//! setting matching the dashboard's fixed thresholds.

use anyhow::{Context, Result};
use backlink_stats_core::{MetricComparator, StabilityAnalyzer, TierThresholds};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for backlink-stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gap tier thresholds, in percent.
    pub thresholds: TierThresholds,
    /// Velocity stability constants.
    pub stability: StabilityAnalyzer,
    /// How reports are rendered.
    pub output: OutputConfig,
    /// HTTP API settings.
    pub server: ServerConfig,
}

/// Report rendering format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Configuration for report output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Whether the terminal reporter uses ANSI colors.
    pub color: bool,
}

/// Configuration for the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Terminal,
            color: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Default configuration file name.
const DEFAULT_CONFIG_FILE: &str = ".backlink-stats.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `.backlink-stats.toml` in the current directory,
    /// or fall back to defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load_or_default() -> Result<Config> {
        let path = Path::new(DEFAULT_CONFIG_FILE);

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from the specified path, or try the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the specified file cannot be read or parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load_or_default(),
        }
    }

    /// Build the gap comparator described by `[thresholds]`.
    pub fn comparator(&self) -> Result<MetricComparator> {
        MetricComparator::new(self.thresholds).context("Invalid [thresholds] configuration")
    }

    /// Build the stability analyzer described by `[stability]`.
    pub fn analyzer(&self) -> Result<StabilityAnalyzer> {
        StabilityAnalyzer::new(self.stability.cv_threshold, self.stability.outlier_sigma)
            .context("Invalid [stability] configuration")
    }
}
