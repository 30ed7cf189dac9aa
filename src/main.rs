use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod config;
mod error;
mod gemini;
mod state;
mod web;

#[cfg(test)]
mod testing;

use config::RelayConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------
    // Logging
    // -----------------------------
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // -----------------------------
    // Configuration
    // -----------------------------
    let config = RelayConfig::from_env();
    if config.api_key().is_none() {
        warn!("GEMINI_API_KEY is not set; /api/generate will answer 500 until it is");
    }
    info!(?config, "loaded configuration");

    let addr = config.bind_addr.clone();
    let state = AppState::new(config);

    // -----------------------------
    // Routers
    // -----------------------------
    let app = Router::new()
        .merge(web::router())
        .merge(api::router())
        .with_state(state);

    let listener = TcpListener::bind(&addr).await?;

    info!("🌐 page at http://{addr}/");
    info!("🛠 generate at http://{addr}/api/generate");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(?err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
