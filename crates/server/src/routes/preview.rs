//! GET /preview?src=<url> — the main preview entry point.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use docview_core::Error;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    src: Option<String>,
}

pub async fn preview_handler(
    State(state): State<Arc<AppState>>, Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, ApiError> {
    let src = query
        .src
        .ok_or_else(|| Error::InvalidInput("missing required query parameter `src`".into()))?;

    let page = state.preview.preview(&src).await?;
    tracing::info!(key = %page.key, kind = ?page.kind, "preview served");

    Ok(Html(page.html))
}
