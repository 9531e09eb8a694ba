mod backend_client;
mod catalog;
mod config;
mod errors;
mod evaluation;
mod presentation;
mod routes;
mod selection;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend_client::{HttpBackend, MatchBackend};
use crate::catalog::FileCatalog;
use crate::config::Config;
use crate::routes::build_router;
use crate::selection::controller::SelectionController;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting match dashboard v{}", env!("CARGO_PKG_VERSION"));

    let backend: Arc<dyn MatchBackend> = Arc::new(HttpBackend::new(
        &config.backend_url,
        config.backend_timeout,
        config.backend_max_retries,
    )?);
    info!(
        "Backend client initialized ({}, {} attempts per read)",
        config.backend_url, config.backend_max_retries
    );

    let selection = SelectionController::spawn(Arc::clone(&backend), config.view);
    info!("Selection controller started (view: {:?})", config.view);

    let state = AppState {
        backend,
        selection,
        catalog: Arc::new(RwLock::new(FileCatalog::default())),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
