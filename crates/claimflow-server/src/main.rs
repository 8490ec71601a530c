//! Service binary: CLI flags, tracing init, graceful shutdown

use anyhow::Context;
use clap::Parser;
use claimflow_engine::{ClaimWorkflow, WorkflowConfig};
use claimflow_server::{router, AppState};
use claimflow_store::{JsonStore, RecordStore};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "claimflow", version, about = "Claim lifecycle workflow service")]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Directory for JSON persistence; in-memory only when omitted
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seconds between payment initiation and automatic settlement
    #[arg(long, default_value_t = 5)]
    settlement_delay_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let store: Arc<dyn RecordStore> = match &cli.data_dir {
        Some(dir) => Arc::new(
            JsonStore::open(dir)
                .await
                .with_context(|| format!("opening data directory {}", dir.display()))?,
        ),
        None => Arc::new(JsonStore::ephemeral()),
    };

    let config = WorkflowConfig::new()
        .with_settlement_delay(Duration::from_secs(cli.settlement_delay_secs));
    let workflow = Arc::new(ClaimWorkflow::new(store, config));
    let app = router(AppState::new(Arc::clone(&workflow)));

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("binding {}", cli.bind))?;
    tracing::info!(version = claimflow_server::VERSION, addr = %cli.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // Settle anything still pending before the process exits
    workflow.shutdown().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install ctrl-c handler");
    }
}
