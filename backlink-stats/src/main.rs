use anyhow::{Context, Result};
use backlink_stats::{dataset_for, render_report, Cli, Command, Config};
use backlink_stats_server::{run_server, AppState};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(cli: &Cli) {
    let default_filter = if cli.verbose {
        "backlink_stats=debug,backlink_stats_core=debug,backlink_stats_server=debug"
    } else if matches!(cli.command, Command::Serve { .. }) {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    // Load config and apply CLI overrides
    let mut config = Config::load_from(cli.config.as_deref())?;
    cli.apply_to_config(&mut config);

    tracing::debug!(?config, "configuration loaded");

    if let Command::Serve { .. } = cli.command {
        let state = AppState::new(config.comparator()?, config.analyzer()?);
        return run_server(state, &config.server.host, config.server.port)
            .await
            .context("Failed to run API server");
    }

    let dataset = dataset_for(&cli.command)?;

    let stdout = std::io::stdout();
    let mut writer = stdout.lock();
    render_report(&dataset, &config, &mut writer).context("Failed to render report")?;

    Ok(())
}
