//! Configuration module for assetshelf
//!
//! Handles application configuration including:
//! - The asset root directory served to clients
//! - HTTP bind address
//! - Allowed CORS origins
//!
//! Configuration is layered: built-in defaults, then an optional
//! `assetshelf.toml` in the working directory, then `ASSETSHELF_*`
//! environment variables (e.g. `ASSETSHELF_ROOT`, `ASSETSHELF_SERVER__PORT`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::ConfigError;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root directory of the asset library
    pub root: PathBuf,

    /// HTTP server settings
    pub server: ServerConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Additional allowed origins (beyond localhost)
    pub additional_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8470,
            additional_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Get all allowed origins
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![
            format!("http://localhost:{}", self.port),
            format!("http://127.0.0.1:{}", self.port),
        ];
        origins.extend(self.additional_origins.clone());
        origins
    }
}

impl AppConfig {
    /// Load configuration from defaults, optional file, and environment
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = config::Config::try_from(&AppConfig::default()).map_err(|e| {
            ConfigError::LoadFailed {
                reason: e.to_string(),
            }
        })?;

        let cfg = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("assetshelf").required(false))
            .add_source(config::Environment::with_prefix("ASSETSHELF").separator("__"))
            .build()
            .map_err(|e| ConfigError::LoadFailed {
                reason: e.to_string(),
            })?;

        cfg.try_deserialize()
            .map_err(|e| ConfigError::LoadFailed {
                reason: e.to_string(),
            })
    }

    /// Validate the configuration at startup
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "root".to_string(),
                value: String::new(),
            });
        }
        if !self.root.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "root".to_string(),
                value: self.root.display().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8470);
        assert!(config.server.additional_origins.is_empty());
    }

    #[test]
    fn test_allowed_origins_include_localhost() {
        let server = ServerConfig {
            additional_origins: vec!["http://viewer.local".to_string()],
            ..Default::default()
        };
        let origins = server.allowed_origins();
        assert!(origins.contains(&"http://localhost:8470".to_string()));
        assert!(origins.contains(&"http://127.0.0.1:8470".to_string()));
        assert!(origins.contains(&"http://viewer.local".to_string()));
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let config = AppConfig {
            root: PathBuf::from("/nonexistent/asset/library"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            root: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
