mod config;
mod routes;
mod state;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::state::AppState;

const DEFAULT_LOG_FILTER: &str = "notionical=info,tower_http=info";

#[tokio::main]
async fn main() -> Result<()> {
    // Variables from .env are only defaults, the real environment wins
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    let addr = config.bind;
    info!(
        calendar = %config.calendar_name,
        database = %config.calendar_id,
        "Starting notionical"
    );

    let app = routes::router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("notionical listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
