//! Server configuration for the Acacia REST API.
//!
//! This module provides configuration types for the REST server, supporting
//! both programmatic configuration and environment variable overrides.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ACACIA_SERVER_PORT` | 8080 | Server port |
//! | `ACACIA_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `ACACIA_LOG_LEVEL` | info | Log level |
//! | `ACACIA_MAX_BODY_SIZE` | 2097152 | Max request body (bytes) |
//! | `ACACIA_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ACACIA_ENABLE_CORS` | true | Enable CORS |
//! | `ACACIA_CORS_ORIGINS` | * | Allowed origins |
//! | `ACACIA_DATABASE_URL` | acacia.db | SQLite database path |
//! | `ACACIA_DEFAULT_PAGE_SIZE` | 10 | Default list page size |
//! | `ACACIA_MAX_PAGE_SIZE` | 100 | Maximum list page size |

use clap::Parser;

/// Server configuration for the Acacia REST API.
///
/// Construct from environment variables with [`ServerConfig::from_env`],
/// from command line arguments with `ServerConfig::parse`, or
/// programmatically via struct update syntax on `Default`.
#[derive(Debug, Clone, Parser)]
#[command(name = "acacia-server")]
#[command(about = "Acacia content platform REST server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "ACACIA_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "ACACIA_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ACACIA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "ACACIA_MAX_BODY_SIZE", default_value = "2097152")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "ACACIA_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "ACACIA_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "ACACIA_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "ACACIA_CORS_METHODS",
        default_value = "GET,POST,PUT,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "ACACIA_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Database connection string (SQLite path, or :memory:).
    #[arg(long, env = "ACACIA_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Default page size for list results.
    #[arg(long, env = "ACACIA_DEFAULT_PAGE_SIZE", default_value = "10")]
    pub default_page_size: u32,

    /// Maximum page size for list results.
    #[arg(long, env = "ACACIA_MAX_PAGE_SIZE", default_value = "100")]
    pub max_page_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 2 * 1024 * 1024, // 2MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            database_url: None,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl ServerConfig {
    /// Creates a ServerConfig from environment variables, falling back to
    /// defaults when parsing fails.
    pub fn from_env() -> Self {
        Self::try_parse().unwrap_or_default()
    }

    /// Configuration suitable for tests: quiet logging, small pages.
    pub fn for_testing() -> Self {
        Self {
            log_level: "error".to_string(),
            enable_cors: false,
            ..Default::default()
        }
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.default_page_size == 0 {
            errors.push("Default page size cannot be 0".to_string());
        }

        if self.default_page_size > self.max_page_size {
            errors.push("Default page size cannot exceed max page size".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_port_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_page_size_ordering_enforced() {
        let config = ServerConfig {
            default_page_size: 500,
            max_page_size: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }
}
