//! Asset browser server implementation
//!
//! Builds the axum router (listing query, raw file streaming, health) and
//! binds it to the configured address with CORS and request tracing.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes::{get_listing, health, serve_file};
use crate::core::config::AppConfig;
use crate::listing::DirectoryLister;

/// Shared state for the HTTP layer
///
/// Read-only across requests; listings are recomputed per request.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// The directory lister over the configured root
    pub lister: Arc<DirectoryLister>,
}

/// Asset browser HTTP server
pub struct BrowserServer {
    state: AppState,
}

impl BrowserServer {
    /// Create a server over the configured asset root
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        let lister = Arc::new(DirectoryLister::with_default_rules(config.root.clone()));
        Self {
            state: AppState { config, lister },
        }
    }

    /// Get a reference to the server state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router with all routes and middleware
    pub fn build_router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_origin(
                self.state
                    .config
                    .server
                    .allowed_origins()
                    .iter()
                    .filter_map(|o| o.parse::<HeaderValue>().ok())
                    .collect::<Vec<_>>(),
            );

        Router::new()
            .route("/api/listing", get(get_listing))
            .route("/files/*path", get(serve_file))
            .route("/health", get(health))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// Start the server (blocking)
    pub async fn serve(&self) -> Result<(), ApiError> {
        let addr = format!(
            "{}:{}",
            self.state.config.server.host, self.state.config.server.port
        );
        let router = self.build_router();

        tracing::info!(
            "asset browser listening on {} (root: {})",
            addr,
            self.state.config.root.display()
        );

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::BindFailed {
                reason: e.to_string(),
            })?;

        axum::serve(listener, router)
            .await
            .map_err(|e| ApiError::Internal {
                reason: e.to_string(),
            })?;

        Ok(())
    }
}
