//! feriados-api server entry point.
//!
//! Loads configuration, hydrates the holiday store and serves the HTTP API
//! until Ctrl+C.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use feriados_api::api;
use feriados_api::app_state::AppState;
use feriados_api::config::{LogFormat, ServiceConfig};
use feriados_api::domain::SystemClock;
use feriados_api::persistence::JsonFileStorage;
use feriados_api::service::HolidayStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::from_env().context("invalid configuration")?;

    // Initialize tracing
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, ?config, "starting feriados-api");

    // Hydrate the store
    let storage = JsonFileStorage::new(&config.holidays_file);
    let store = HolidayStore::load(storage)
        .await
        .with_context(|| format!("loading {}", config.holidays_file.display()))?;

    // Build application state
    let listen_addr = config.listen_addr;
    let app_state = AppState::new(Arc::new(store), Arc::new(config), Arc::new(SystemClock));
    let app = api::app(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("binding {listen_addr}"))?;
    tracing::info!(addr = %listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
