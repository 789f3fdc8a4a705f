//! Shared configuration loader module for Salesdash services
//!
//! This module provides a unified configuration loading system with environment variable
//! parsing, validation, and support for .env files. All configuration uses the
//! `SALESDASH_` prefix for environment variables.
//!
//! # Features
//!
//! - Environment variable parsing with typed values
//! - .env file support via dotenvy
//! - Configuration validation with clear error messages
//! - Default values for optional fields
//! - Configuration override hierarchy: defaults < .env < environment
//!
//! # Example
//!
//! ```no_run
//! use salesdash_core::config::{ConfigLoader, ServiceConfig, SourceConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load .env file (optional)
//! dotenvy::dotenv().ok();
//!
//! // Load and validate configurations
//! let source_config = SourceConfig::from_env()?;
//! let service_config = ServiceConfig::from_env()?;
//!
//! source_config.validate()?;
//! service_config.validate()?;
//! # Ok(())
//! # }
//! ```

use crate::error::DashboardError;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Configuration loader trait
///
/// Provides standardized methods for loading and validating configuration from
/// environment variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from environment variables
    ///
    /// Reads environment variables with the `SALESDASH_` prefix and constructs
    /// a configuration instance with defaults for missing optional values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if:
    /// - Required environment variables are missing
    /// - Environment variable values cannot be parsed
    fn from_env() -> Result<Self, DashboardError>;

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if any validation check fails.
    fn validate(&self) -> Result<(), DashboardError>;
}

/// Ledger source configuration
///
/// Configuration for the external table source the dashboard reads its
/// transaction ledger from. The ledger is fetched either over HTTP or
/// from a local CSV file, and cached in memory for `ttl`.
///
/// # Environment Variables
///
/// - `SALESDASH_SOURCE_URL`: HTTP(S) URL of the ledger CSV (required unless a path is set)
/// - `SALESDASH_SOURCE_PATH`: Local path to the ledger CSV (takes precedence over the URL)
/// - `SALESDASH_SOURCE_TTL`: Cache time-to-live in seconds (default: 60, 0 = refetch on every read)
/// - `SALESDASH_SOURCE_TIMEOUT`: HTTP fetch timeout in seconds (default: 30)
///
/// # Example
///
/// ```bash
/// export SALESDASH_SOURCE_URL="https://sheets.example.com/ledger.csv"
/// export SALESDASH_SOURCE_TTL="60"
/// ```
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// HTTP(S) URL of the ledger CSV
    pub url: Option<String>,
    /// Local path to the ledger CSV, preferred over `url` when both are set
    pub path: Option<PathBuf>,
    /// How long one snapshot of the ledger stays fresh
    pub ttl: Duration,
    /// HTTP fetch timeout
    pub fetch_timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            path: None,
            ttl: Duration::from_secs(60),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

impl ConfigLoader for SourceConfig {
    fn from_env() -> Result<Self, DashboardError> {
        let url = std::env::var("SALESDASH_SOURCE_URL").ok();
        let path = std::env::var("SALESDASH_SOURCE_PATH")
            .ok()
            .map(PathBuf::from);

        let ttl_secs = parse_env_var("SALESDASH_SOURCE_TTL", 60u64)?;
        let fetch_timeout_secs = parse_env_var("SALESDASH_SOURCE_TIMEOUT", 30u64)?;

        Ok(Self {
            url,
            path,
            ttl: Duration::from_secs(ttl_secs),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }

    fn validate(&self) -> Result<(), DashboardError> {
        if self.url.is_none() && self.path.is_none() {
            return Err(DashboardError::ConfigurationError {
                message: "SALESDASH_SOURCE_URL or SALESDASH_SOURCE_PATH must be set".to_string(),
                key: Some("SALESDASH_SOURCE_URL".to_string()),
            });
        }

        if let Some(ref url) = self.url {
            let parsed = Url::parse(url).map_err(|e| DashboardError::ConfigurationError {
                message: format!("Invalid SALESDASH_SOURCE_URL: {}", e),
                key: Some("SALESDASH_SOURCE_URL".to_string()),
            })?;

            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(DashboardError::ConfigurationError {
                    message: format!(
                        "SALESDASH_SOURCE_URL must be http or https, got '{}'",
                        parsed.scheme()
                    ),
                    key: Some("SALESDASH_SOURCE_URL".to_string()),
                });
            }
        }

        if self.fetch_timeout.as_secs() == 0 {
            return Err(DashboardError::ConfigurationError {
                message: "fetch timeout must be greater than 0 seconds".to_string(),
                key: Some("SALESDASH_SOURCE_TIMEOUT".to_string()),
            });
        }

        Ok(())
    }
}

/// Service configuration
///
/// Configuration for the HTTP service: host, port, workers, and logging.
///
/// # Environment Variables
///
/// - `SALESDASH_SERVICE_HOST` (optional): Service bind host (default: "0.0.0.0")
/// - `SALESDASH_SERVICE_PORT` (optional): Service bind port (default: 8080)
/// - `SALESDASH_SERVICE_WORKERS` (optional): Number of worker threads (default: CPU count)
/// - `SALESDASH_SERVICE_LOG_LEVEL` (optional): Log level (default: "info")
///
/// # Example
///
/// ```bash
/// export SALESDASH_SERVICE_HOST="127.0.0.1"
/// export SALESDASH_SERVICE_PORT="3000"
/// export SALESDASH_SERVICE_LOG_LEVEL="debug"
/// ```
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service bind host
    pub host: String,
    /// Service bind port
    pub port: u16,
    /// Number of worker threads
    pub workers: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: num_cpus::get(),
            log_level: "info".to_string(),
        }
    }
}

impl ConfigLoader for ServiceConfig {
    fn from_env() -> Result<Self, DashboardError> {
        let host = std::env::var("SALESDASH_SERVICE_HOST")
            .or_else(|_| std::env::var("HOST"))
            .unwrap_or_else(|_| ServiceConfig::default().host);

        let port = parse_env_var("SALESDASH_SERVICE_PORT", ServiceConfig::default().port)
            .or_else(|_| parse_env_var("PORT", ServiceConfig::default().port))?;

        let workers = parse_env_var(
            "SALESDASH_SERVICE_WORKERS",
            ServiceConfig::default().workers,
        )?;

        let log_level = std::env::var("SALESDASH_SERVICE_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| ServiceConfig::default().log_level);

        Ok(Self {
            host,
            port,
            workers,
            log_level,
        })
    }

    fn validate(&self) -> Result<(), DashboardError> {
        if self.port == 0 {
            return Err(DashboardError::ConfigurationError {
                message: "port must be greater than 0".to_string(),
                key: Some("SALESDASH_SERVICE_PORT".to_string()),
            });
        }

        if self.workers == 0 {
            return Err(DashboardError::ConfigurationError {
                message: "workers must be greater than 0".to_string(),
                key: Some("SALESDASH_SERVICE_WORKERS".to_string()),
            });
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(DashboardError::ConfigurationError {
                message: format!(
                    "Invalid log_level '{}'. Must be one of: {}",
                    self.log_level,
                    valid_log_levels.join(", ")
                ),
                key: Some("SALESDASH_SERVICE_LOG_LEVEL".to_string()),
            });
        }

        Ok(())
    }
}

/// Helper function to parse environment variable with default value
///
/// # Errors
///
/// Returns a `ConfigurationError` if the value is set but cannot be parsed
fn parse_env_var<T>(key: &str, default: T) -> Result<T, DashboardError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(key)
        .ok()
        .map(|v| {
            v.parse::<T>()
                .map_err(|e| DashboardError::ConfigurationError {
                    message: format!("Failed to parse {}: {}", key, e),
                    key: Some(key.to_string()),
                })
        })
        .unwrap_or(Ok(default))
}

/// Load .env file if present
///
/// Convenience wrapper around dotenvy that stays quiet when no .env file
/// exists.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn set_test_env(key: &str, value: &str) {
        env::set_var(key, value);
    }

    fn clear_test_env(key: &str) {
        env::remove_var(key);
    }

    #[test]
    fn test_source_config_default() {
        let config = SourceConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
        assert!(config.url.is_none());
        assert!(config.path.is_none());
    }

    #[test]
    fn test_source_config_requires_url_or_path() {
        let config = SourceConfig::default();
        let result = config.validate();
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            DashboardError::ConfigurationError { .. }
        ));
    }

    #[test]
    fn test_source_config_rejects_non_http_url() {
        let config = SourceConfig {
            url: Some("ftp://example.com/ledger.csv".to_string()),
            ..SourceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_config_accepts_https_url() {
        let config = SourceConfig {
            url: Some("https://example.com/ledger.csv".to_string()),
            ..SourceConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_config_accepts_path_only() {
        let config = SourceConfig {
            path: Some(PathBuf::from("/data/ledger.csv")),
            ..SourceConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_config_zero_ttl_is_valid() {
        // TTL 0 means "refetch on every read", an allowed override
        let config = SourceConfig {
            path: Some(PathBuf::from("/data/ledger.csv")),
            ttl: Duration::from_secs(0),
            ..SourceConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_source_config_from_env() {
        set_test_env("SALESDASH_SOURCE_URL", "https://example.com/ledger.csv");
        set_test_env("SALESDASH_SOURCE_TTL", "10");

        let config = SourceConfig::from_env().unwrap();
        assert_eq!(
            config.url.as_deref(),
            Some("https://example.com/ledger.csv")
        );
        assert_eq!(config.ttl, Duration::from_secs(10));

        clear_test_env("SALESDASH_SOURCE_URL");
        clear_test_env("SALESDASH_SOURCE_TTL");
    }

    #[test]
    fn test_service_config_default() {
        let config = ServiceConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "info");
        assert!(config.workers > 0);
    }

    #[test]
    fn test_service_config_validation_invalid_log_level() {
        let config = ServiceConfig {
            log_level: "verbose".to_string(),
            ..ServiceConfig::default()
        };

        let result = config.validate();
        assert!(result.is_err());
        match result.unwrap_err() {
            DashboardError::ConfigurationError { message, .. } => {
                assert!(message.contains("Invalid log_level"));
            }
            _ => panic!("Expected ConfigurationError"),
        }
    }

    #[test]
    fn test_service_config_validation_zero_port() {
        let config = ServiceConfig {
            port: 0,
            ..ServiceConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_env_var_with_default() {
        let result: u32 = parse_env_var("SALESDASH_NON_EXISTENT_VAR", 42).unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn test_parse_env_var_invalid_value() {
        set_test_env("SALESDASH_TEST_INVALID_VAR", "not-a-number");
        let result: Result<u32, _> = parse_env_var("SALESDASH_TEST_INVALID_VAR", 42);
        assert!(result.is_err());
        clear_test_env("SALESDASH_TEST_INVALID_VAR");
    }
}
