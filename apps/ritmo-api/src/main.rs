//! # Ritmo Offers API
//!
//! HTTP server for companies and their offers.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        API Server                                       │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► Handlers ───► Store ───► storage.json    │
//! │                                               │                         │
//! │                                        Mutex<LocalStorage>              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use ritmo_api::{router, ApiConfig, AppState};
use ritmo_store::{Store, StoreConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,ritmo_api=debug,ritmo_store=debug")),
        )
        .with_target(true)
        .init();

    info!("Starting Ritmo offers API...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        addr = %config.bind_address(),
        storage = %config.storage_path.display(),
        currency = config.display_currency.code,
        "Configuration loaded"
    );

    // Load the storage document
    let store = Store::open(
        StoreConfig::new(&config.storage_path).create_if_missing(config.create_storage),
    )
    .await
    .context("failed to open storage document")?;

    let app = router(AppState::new(store.clone(), config.display_currency));

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Final flush
    store.close().await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
