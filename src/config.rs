//! Runtime settings.
//!
//! Values come from, in order of precedence: command-line flags (or their
//! environment variables, see [`crate::cli::Cli`]), then an optional YAML
//! file passed with `--config`, then built-in defaults. The provider API key
//! has no default and must come from one of the first two.
//!
//! ```yaml
//! api_key: "..."
//! base_url: "https://newsapi.org"
//! timeout_secs: 10
//! bind: "127.0.0.1:8000"
//! allowed_origin: "http://localhost:8081"
//! ```

use crate::cli::Cli;
use axum::http::HeaderValue;
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8081";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("no news API key configured (use --api-key, NEWS_API_KEY or api_key in the config file)")]
    MissingApiKey,

    #[error("invalid base URL {0:?}: {1}")]
    InvalidBaseUrl(String, url::ParseError),

    #[error("invalid bind address {0:?}")]
    InvalidBind(String),

    #[error("invalid allowed origin {0:?}")]
    InvalidOrigin(String),

    #[error("timeout must be at least one second")]
    ZeroTimeout,
}

/// Optional YAML config file contents.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub bind: Option<String>,
    pub allowed_origin: Option<String>,
}

impl FileConfig {
    pub fn from_yaml(path: &str, text: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }
}

/// Read and parse a YAML config file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn load_file(path: &str) -> Result<FileConfig, ConfigError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
    let config = FileConfig::from_yaml(path, &text)?;
    info!("Loaded config file");
    Ok(config)
}

/// Fully resolved settings.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: Url,
    pub timeout: Duration,
    pub bind: SocketAddr,
    pub allowed_origin: HeaderValue,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("bind", &self.bind)
            .field("allowed_origin", &self.allowed_origin)
            .finish()
    }
}

impl Settings {
    /// Merge CLI values over file values over defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .clone()
            .or(file.api_key)
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let base_url = cli
            .base_url
            .clone()
            .or(file.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url =
            Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl(base_url.clone(), e))?;

        let timeout_secs = cli
            .timeout_secs
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let bind = cli
            .bind
            .clone()
            .or(file.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;

        let origin = cli
            .allowed_origin
            .clone()
            .or(file.allowed_origin)
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin =
            HeaderValue::from_str(&origin).map_err(|_| ConfigError::InvalidOrigin(origin.clone()))?;

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            bind,
            allowed_origin,
        })
    }
}
