//! HTTP route handlers
//!
//! Handlers for the listing query, raw file streaming, and the health
//! probe. All filesystem access goes through the root-confinement guard
//! first.

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use super::error::ApiError;
use super::paths::resolve_under_root;
use super::server::AppState;
use crate::core::utils::extension_of;
use crate::listing::DirectoryListing;

/// Query parameters for the listing endpoint
#[derive(Debug, Deserialize)]
pub struct ListingParams {
    /// Path relative to the asset root; empty or absent means the root
    pub path: Option<String>,
}

/// Serve a grouped directory listing
///
/// Route: GET /api/listing?path=<rel>
pub async fn get_listing(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<DirectoryListing>, ApiError> {
    let rel_path = params.path.unwrap_or_default();
    resolve_under_root(&state.config.root, &rel_path)?;

    let listing = state.lister.list(&rel_path).await?;
    Ok(Json(listing))
}

/// Stream a raw file from the asset root
///
/// Route: GET /files/*path
///
/// Rejects directory targets and anything resolving outside the root.
pub async fn serve_file(
    State(state): State<AppState>,
    Path(rel_path): Path<String>,
) -> Result<Response, ApiError> {
    let resolved = resolve_under_root(&state.config.root, &rel_path)?;

    let meta = tokio::fs::metadata(&resolved)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ApiError::NotFound {
                path: rel_path.clone(),
            },
            _ => ApiError::Io(e),
        })?;
    if meta.is_dir() {
        return Err(ApiError::NotAFile { path: rel_path });
    }

    let file = tokio::fs::File::open(&resolved).await?;
    let stream = ReaderStream::new(file);

    let filename = rel_path.rsplit('/').next().unwrap_or(rel_path.as_str());
    let content_type = content_type_for(&extension_of(filename));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, meta.len())
        .header("X-Content-Type-Options", "nosniff")
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::Internal {
            reason: e.to_string(),
        })
}

/// Liveness probe
///
/// Route: GET /health
pub async fn health() -> &'static str {
    "OK"
}

/// Content type for a lowercased, dot-prefixed extension
pub fn content_type_for(extension: &str) -> &'static str {
    match extension {
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".webp" => "image/webp",
        ".svg" => "image/svg+xml",
        ".avif" => "image/avif",
        ".bmp" => "image/bmp",
        ".tif" | ".tiff" => "image/tiff",
        ".exr" => "image/x-exr",
        ".hdr" => "image/vnd.radiance",
        ".mp4" => "video/mp4",
        ".mov" => "video/quicktime",
        ".avi" => "video/x-msvideo",
        ".mkv" => "video/x-matroska",
        ".webm" => "video/webm",
        ".mp3" => "audio/mpeg",
        ".wav" => "audio/wav",
        ".flac" => "audio/flac",
        ".ogg" => "audio/ogg",
        ".m4a" => "audio/mp4",
        ".pdf" => "application/pdf",
        ".txt" => "text/plain",
        ".md" => "text/markdown",
        ".json" => "application/json",
        ".xml" => "application/xml",
        ".csv" => "text/csv",
        _ => "application/octet-stream",
    }
}
