//! Error types for assetshelf
//!
//! The aggregation pipeline itself is pure and total; errors only arise at
//! the filesystem and HTTP boundaries.

use thiserror::Error;

/// Result type alias for assetshelf operations
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Main error type for assetshelf
#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),

    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors surfaced by the directory lister
///
/// A failed listing yields one of these rather than a partial result; a
/// nonexistent directory is distinguishable from an empty one.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Directory not found: {path}")]
    NotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    #[error("Directory read failed: {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Root-confinement errors
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Path escapes the asset root: {path}")]
    Traversal { path: String },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config load failed: {reason}")]
    LoadFailed { reason: String },

    #[error("Invalid config value: {field} = {value}")]
    InvalidValue { field: String, value: String },
}
