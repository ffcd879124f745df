//! Command-line interface for backlink-stats.

use crate::config::{Config, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "backlink-stats")]
#[command(about = "Gap and velocity-stability reports for SEO backlink analysis")]
#[command(version)]
pub struct Cli {
    /// Path to config file (defaults to .backlink-stats.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute a report for a JSON dataset file
    Report {
        /// Dataset file with "metrics" and "velocity" sections
        dataset: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compute a report for the built-in demo dataset
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare a single value against its reference
    Gap {
        #[arg(allow_negative_numbers = true)]
        current: f64,

        #[arg(allow_negative_numbers = true)]
        reference: f64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Analyze the stability of per-period counts, in chronological order
    Stability {
        #[arg(required = true, allow_negative_numbers = true)]
        counts: Vec<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Serve the JSON HTTP API
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colored terminal output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    /// Only non-None optional values will override the config.
    pub fn apply_to_config(&self, config: &mut Config) {
        match &self.command {
            Command::Report { output, .. }
            | Command::Demo { output }
            | Command::Gap { output, .. }
            | Command::Stability { output, .. } => {
                if let Some(format) = output.format {
                    config.output.format = format;
                }
                if output.no_color {
                    config.output.color = false;
                }
            }
            Command::Serve { host, port } => {
                if let Some(host) = host {
                    config.server.host = host.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
            }
        }
    }
}
