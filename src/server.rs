use anyhow::{Context, Result};
use tokio::net::TcpListener;

use crate::api::{router, AppState, SIMULATE_PATH};
use crate::config::ServerConfig;
use crate::simulator::LoanSimulator;

/// bind and serve until Ctrl-C
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let state = AppState::new(LoanSimulator::new(config.rates));
    let app = router(state);

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    let local_addr = listener.local_addr()?;
    tracing::info!(bind = %local_addr, path = SIMULATE_PATH, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated abnormally")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
