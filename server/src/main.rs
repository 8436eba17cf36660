//! Static file server - delivers the browser build and its assets over HTTP.
//!
//! No API routes, no game state: the whole simulation runs in the client.

mod config;
mod routes;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    info!("Serving static files from {:?}", config.public_dir);

    let app = routes::router(&config.public_dir);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("Server listening at http://localhost:{}", config.bind_addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {err}");
        // Never resolve: keep serving rather than shutting down immediately.
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
