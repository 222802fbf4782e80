//! docview server entry point.
//!
//! Boots the preview proxy: load configuration, initialise the cache
//! store and collaborators, serve the axum router.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use docview_server::{routes, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = docview_core::AppConfig::load()?;
    tracing::info!(
        port = config.port,
        cache_dir = %config.cache_dir.display(),
        cache_max_age_secs = config.cache_max_age_secs,
        "starting docview"
    );

    let state = Arc::new(AppState::from_config(config)?);
    let app = routes::router(state.clone());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", state.config.port)).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
