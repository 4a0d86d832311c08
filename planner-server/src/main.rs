mod config;
mod routes;
mod state;
mod store;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store = store::connect(&config).await?;
    let app = routes::app(AppState::new(store));

    let addr = config.addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("planner-server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
