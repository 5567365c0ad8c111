mod config;
mod error;
mod gemini;
mod generator;
mod models;
mod profile;
mod routes;

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    config::Config,
    gemini::GeminiClient,
    generator::ContentGenerator,
    profile::PromptProfile,
    routes::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Init tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env();
    if config.api_key.is_none() {
        tracing::warn!("GOOGLE_API_KEY is not set; generation requests will fail");
    }

    let profile = PromptProfile::load(&config.sample_writings_path)
        .context("cannot start without the persona sample writings")?;
    let gemini = GeminiClient::new(config.api_key.clone(), config.api_base.clone(), config.model.clone());
    tracing::info!(model = gemini.model(), "Using Gemini model");

    let generator = ContentGenerator::new(Arc::new(profile), Arc::new(gemini));
    let persona = generator.profile();
    tracing::info!(role = persona.role(), instructions = persona.instructions().len(), "Persona loaded");

    let app = routes::router(AppState { generator: Arc::new(generator) });

    let listener = tokio::net::TcpListener::bind(config.addr).await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!(addr = %config.addr, "Starting server");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
