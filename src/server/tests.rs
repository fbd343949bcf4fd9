//! Tests for the HTTP layer
//!
//! Exercises the handlers directly with constructed state; route-level
//! wiring is covered by the router smoke test.

use std::fs;
use std::path::Path as StdPath;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};

use super::error::ApiError;
use super::routes::{get_listing, serve_file, ListingParams};
use super::server::BrowserServer;
use crate::core::config::AppConfig;
use crate::core::error::{ListingError, PathError};

fn server_over(root: &StdPath) -> BrowserServer {
    BrowserServer::new(AppConfig {
        root: root.to_path_buf(),
        ..Default::default()
    })
}

fn touch(dir: &StdPath, name: &str) {
    fs::write(dir.join(name), b"data").unwrap();
}

#[tokio::test]
async fn test_listing_endpoint_returns_grouped_items() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "rock.exr");
    touch(tmp.path(), "rock_preview.jpg");
    let server = server_over(tmp.path());

    let listing = get_listing(
        State(server.state().clone()),
        Query(ListingParams { path: None }),
    )
    .await
    .unwrap()
    .0;
    assert_eq!(listing.path, "");
    assert_eq!(listing.items.len(), 1);
    assert_eq!(listing.items[0].variants.len(), 2);
}

#[tokio::test]
async fn test_listing_rejects_traversal_with_forbidden() {
    let tmp = tempfile::tempdir().unwrap();
    let server = server_over(tmp.path());

    let err = get_listing(
        State(server.state().clone()),
        Query(ListingParams {
            path: Some("../outside".to_string()),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::Path(PathError::Traversal { .. })));
    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_listing_missing_directory_maps_to_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let server = server_over(tmp.path());

    let err = get_listing(
        State(server.state().clone()),
        Query(ListingParams {
            path: Some("missing".to_string()),
        }),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Listing(ListingError::NotFound { .. })
    ));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serve_file_streams_with_content_type() {
    let tmp = tempfile::tempdir().unwrap();
    touch(tmp.path(), "wood.png");
    let server = server_over(tmp.path());

    let response = serve_file(
        State(server.state().clone()),
        Path("wood.png".to_string()),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "image/png"
    );
    assert_eq!(response.headers().get(header::CONTENT_LENGTH).unwrap(), "4");
}

#[tokio::test]
async fn test_serve_file_rejects_directory_targets() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir(tmp.path().join("textures")).unwrap();
    let server = server_over(tmp.path());

    let err = serve_file(
        State(server.state().clone()),
        Path("textures".to_string()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::NotAFile { .. }));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serve_file_rejects_traversal() {
    let tmp = tempfile::tempdir().unwrap();
    let server = server_over(tmp.path());

    let err = serve_file(
        State(server.state().clone()),
        Path("../../etc/passwd".to_string()),
    )
    .await
    .unwrap_err();

    assert_eq!(err.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_serve_file_missing_maps_to_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let server = server_over(tmp.path());

    let err = serve_file(
        State(server.state().clone()),
        Path("missing.png".to_string()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_router_builds() {
    let tmp = tempfile::tempdir().unwrap();
    let server = server_over(tmp.path());
    let _router = server.build_router();
}
