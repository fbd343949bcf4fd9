//! Asset browser HTTP server
//!
//! Thin glue over the catalog pipeline:
//! - `GET /api/listing?path=<rel>`: grouped directory listing as JSON
//! - `GET /files/*path`: raw file streaming with extension-derived
//!   content type
//! - `GET /health`: liveness probe
//!
//! Every request is confined to the configured asset root before any
//! filesystem access.

mod error;
mod paths;
mod routes;
mod server;

#[cfg(test)]
mod tests;

pub use error::ApiError;
pub use paths::resolve_under_root;
pub use routes::{content_type_for, get_listing, health, serve_file, ListingParams};
pub use server::{AppState, BrowserServer};
