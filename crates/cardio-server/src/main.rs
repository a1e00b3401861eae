//! Cardio Risk static asset server.

use anyhow::{Context, Result};
use tokio::net::TcpListener;

use cardio_common::{LogConfig, init_logging};
use cardio_server::{INDEX_FILE, ServerConfig, serve};

#[tokio::main]
async fn main() {
    if let Err(error) = init_logging(&LogConfig::service()) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    if let Err(error) = run().await {
        tracing::error!(error = %format!("{error:#}"), "server stopped");
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = ServerConfig::from_env()?;
    let index = config.dist_dir.join(INDEX_FILE);
    if !index.is_file() {
        tracing::warn!(path = %index.display(), "entry document not found");
    }

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("bind {}", config.bind_addr()))?;
    tracing::info!(dist = %config.dist_dir.display(), "server is running on port {}", config.port);

    serve(listener, &config.dist_dir, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
