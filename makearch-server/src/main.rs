//! makearch Server - REST API for automation scenario generation

mod api;
mod config;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use api::AppState;
use config::ServerConfig;
use makearch_ai::ScenarioGenerator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ServerConfig::from_env()?;

    // The provider client is built once and shared by every request
    let state = Arc::new(AppState {
        generator: ScenarioGenerator::from_config(config.ai),
    });

    let app = api::router(state);

    info!("Starting makearch server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
