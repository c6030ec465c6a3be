mod analysis;
mod catalog;
mod chat;
mod config;
mod errors;
mod llm;
mod models;
mod pdf;
mod resume;
mod routes;
mod sessions;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm::LlmGateway;
use crate::routes::build_router;
use crate::state::{AppState, SessionStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing primary API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ascent API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the LLM gateway
    let gateway = LlmGateway::new(config.google_api_key.clone(), config.groq_api_key.clone());
    info!(
        "LLM gateway initialized (default model: {}, secondary provider: {})",
        llm::DEFAULT_MODEL,
        if config.groq_api_key.is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );

    // Resolve the application-level course catalog
    let catalog = catalog::load_app_catalog(Path::new(&config.catalog_path)).map(Arc::new);

    // Build app state
    let state = AppState {
        gateway,
        catalog,
        sessions: SessionStore::default(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
