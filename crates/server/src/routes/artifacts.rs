//! Artifact streaming routes: GET /pdf/{key} and GET /download/{key}.
//!
//! Both address already-cached artifacts directly and are independent of
//! /preview state: an unknown key is a plain 404. Keys are shape-checked
//! before they touch the filesystem.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use docview_core::{ArtifactKind, Error, detect, is_valid_key};

use crate::error::ApiError;
use crate::state::AppState;

/// Stream a cached PDF inline for the viewer embed.
pub async fn pdf_handler(
    State(state): State<Arc<AppState>>, Path(key): Path<String>,
) -> Result<Response, ApiError> {
    if !is_valid_key(&key) {
        return Err(ApiError(Error::InvalidKey));
    }

    let bytes = state.store.read(&key, ArtifactKind::Pdf).await?;
    let disposition = format!("inline; filename=\"{}.pdf\"", &key[..12]);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Stream the cached raw bytes as an attachment.
///
/// The detected type is not persisted, so the MIME type is re-derived
/// from the stored bytes.
pub async fn download_handler(
    State(state): State<Arc<AppState>>, Path(key): Path<String>,
) -> Result<Response, ApiError> {
    if !is_valid_key(&key) {
        return Err(ApiError(Error::InvalidKey));
    }

    let bytes = state.store.read(&key, ArtifactKind::Raw).await?;
    let detected = detect(&bytes, "");

    let extension = if detected.extension.is_empty() { "bin".to_string() } else { detected.extension.clone() };
    let disposition = format!("attachment; filename=\"{}.{}\"", &key[..12], extension);

    Ok((
        [
            (header::CONTENT_TYPE, detected.mime_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
