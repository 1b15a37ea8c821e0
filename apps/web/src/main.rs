mod backend_client;
mod config;
mod errors;
mod models;
mod pages;
mod roadmap;
mod routes;
mod run_id;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend_client::BackendClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerGENAI web v{}", env!("CARGO_PKG_VERSION"));

    let backend = BackendClient::new(
        &config.api_base,
        &config.public_api_base,
        config.backend_timeout,
    )
    .context("Failed to build backend HTTP client")?;
    info!(
        "Backend client initialized (base: {}, timeout: {}s)",
        backend.base_url(),
        config.backend_timeout.as_secs()
    );

    let state = AppState {
        backend: Arc::new(backend),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
