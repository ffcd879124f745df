//! JSON HTTP API for backlink-stats.
//!
//! Exposes gap comparison, velocity stability analysis and value formatting
//! so a dashboard front-end can fetch computed records instead of
//! re-implementing the arithmetic per screen.

mod server;

pub use server::build_router;

use std::sync::Arc;

use backlink_stats_core::{MetricComparator, StabilityAnalyzer};

/// Shared, read-only state for the HTTP handlers.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub comparator: MetricComparator,
    pub analyzer: StabilityAnalyzer,
}

impl AppState {
    pub fn new(comparator: MetricComparator, analyzer: StabilityAnalyzer) -> Self {
        Self {
            comparator,
            analyzer,
        }
    }
}

/// Serve the API on `host:port` until Ctrl-C is received.
pub async fn run_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = build_router(Arc::new(state));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("backlink-stats API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {}", err);
                return;
            }
            tracing::info!("shutting down backlink-stats API");
        })
        .await?;

    Ok(())
}
