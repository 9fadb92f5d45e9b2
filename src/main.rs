mod catalog;
mod clipboard;
mod config;
mod error;
mod gemini;
mod generator;
mod history;
mod models;
mod parameters;
mod routes;
mod session;
mod workspace;

use std::sync::Arc;
use anyhow::Context;
use parking_lot::RwLock;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    clipboard::SystemClipboard,
    config::Config,
    gemini::GeminiClient,
    generator::PromptGenerator,
    routes::AppState,
    session::{LocalSessionProvider, SessionProvider},
    workspace::Page,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    tracing::info!("Using API key: {} (model {})", config.masked_key(), config.model);

    let gemini = GeminiClient::new(config.api_key.clone(), config.api_base.clone());
    if gemini.is_demo() {
        tracing::warn!("No GEMINI_API_KEY set, prompts will be canned demo text");
    }

    let session = Arc::new(LocalSessionProvider::new());
    let page = Arc::new(RwLock::new(Page::new()));
    tokio::spawn(workspace::follow_session(page.clone(), session.subscribe()));
    session.ready(config.auto_sign_in.as_deref());

    let state = AppState {
        page,
        generator: Arc::new(PromptGenerator::new(Arc::new(gemini), config.model.clone())),
        session,
        clipboard: Arc::new(SystemClipboard),
    };

    let app = routes::router(state);

    tracing::info!(addr = %config.addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
