//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FIBER_FIT_DATA_URL` - Base URL of the catalog JSON (only when the data source is `remote`)
//!
//! ## Optional
//! - `FIBER_FIT_DATA_SOURCE` - `remote`, `directory` or `embedded` (default: directory)
//! - `FIBER_FIT_DATA_DIR` - Base directory holding `data/*.json` (default: .)
//! - `FIBER_FIT_FETCH_TIMEOUT_SECS` - HTTP timeout for remote fetches (default: 10)
//! - `FIBER_FIT_STORAGE_PATH` - Durable storage file for the cart (default: .fiber-fit/storage.json)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STORAGE_PATH: &str = ".fiber-fit/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Where the catalog is loaded from
    pub data_source: DataSourceConfig,
    /// Timeout applied to each remote fetch
    pub fetch_timeout: Duration,
    /// File backing the durable key-value storage
    pub storage_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Primary catalog data source.
///
/// The embedded dataset is always available as the fallback regardless of
/// which variant is selected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSourceConfig {
    /// Fetch `data/*.json` over HTTP relative to a base URL.
    Remote { base_url: Url },
    /// Read `data/*.json` from a local directory.
    Directory { root: PathBuf },
    /// Use only the dataset compiled into the binary.
    Embedded,
}

/// Data source selector as written in `FIBER_FIT_DATA_SOURCE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSourceKind {
    Remote,
    Directory,
    Embedded,
}

impl FromStr for DataSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" | "http" => Ok(Self::Remote),
            "directory" | "dir" | "local" => Ok(Self::Directory),
            "embedded" | "bundled" => Ok(Self::Embedded),
            other => Err(format!(
                "unknown data source '{other}' (expected remote, directory or embedded)"
            )),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_source: DataSourceConfig::Directory {
                root: PathBuf::from("."),
            },
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let kind = get_env_or_default("FIBER_FIT_DATA_SOURCE", "directory")
            .parse::<DataSourceKind>()
            .map_err(|e| ConfigError::InvalidEnvVar("FIBER_FIT_DATA_SOURCE".to_string(), e))?;

        let data_source = match kind {
            DataSourceKind::Remote => {
                let raw = get_required_env("FIBER_FIT_DATA_URL")?;
                DataSourceConfig::Remote {
                    base_url: parse_base_url(&raw)?,
                }
            }
            DataSourceKind::Directory => DataSourceConfig::Directory {
                root: PathBuf::from(get_env_or_default("FIBER_FIT_DATA_DIR", ".")),
            },
            DataSourceKind::Embedded => DataSourceConfig::Embedded,
        };

        let timeout_secs = get_env_or_default(
            "FIBER_FIT_FETCH_TIMEOUT_SECS",
            &DEFAULT_FETCH_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("FIBER_FIT_FETCH_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        let storage_path =
            PathBuf::from(get_env_or_default("FIBER_FIT_STORAGE_PATH", DEFAULT_STORAGE_PATH));

        Ok(Self {
            data_source,
            fetch_timeout: Duration::from_secs(timeout_secs),
            storage_path,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the remote base URL.
///
/// A trailing slash is added when missing so relative joins keep the last
/// path segment (`https://cdn/site` + `data/products.json`).
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar("FIBER_FIT_DATA_URL".to_string(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidEnvVar(
            "FIBER_FIT_DATA_URL".to_string(),
            format!("unsupported scheme '{scheme}' (use FIBER_FIT_DATA_SOURCE=directory for local files)"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_kind_parse() {
        assert_eq!(
            "remote".parse::<DataSourceKind>().unwrap(),
            DataSourceKind::Remote
        );
        assert_eq!(
            " Directory ".parse::<DataSourceKind>().unwrap(),
            DataSourceKind::Directory
        );
        assert_eq!(
            "embedded".parse::<DataSourceKind>().unwrap(),
            DataSourceKind::Embedded
        );
        assert!("ftp".parse::<DataSourceKind>().is_err());
    }

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("https://cdn.example.com/site").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/site/");
        assert_eq!(
            url.join("data/products.json").unwrap().as_str(),
            "https://cdn.example.com/site/data/products.json"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_file_scheme() {
        let result = parse_base_url("file:///var/www");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.storage_path, PathBuf::from(".fiber-fit/storage.json"));
        assert!(matches!(
            config.data_source,
            DataSourceConfig::Directory { .. }
        ));
    }
}
