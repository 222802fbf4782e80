//! HTTP surface: the preview route and the artifact streaming routes.

pub mod artifacts;
pub mod preview;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/preview", get(preview::preview_handler))
        .route("/pdf/{key}", get(artifacts::pdf_handler))
        .route("/download/{key}", get(artifacts::download_handler))
        .with_state(state)
}
