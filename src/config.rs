//! Configuration management
//!
//! Settings are read from an optional YAML file, then overridden by
//! environment variables, then validated.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const ENV_BASE_URL: &str = "ESTATE_API_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "ESTATE_API_TIMEOUT_SECS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },
}

// ==================== Configuration Types ====================

/// Listing API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL the endpoint paths are joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Transport timeout; expiry surfaces as "Server Timeout"
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000/".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl ApiConfig {
    /// The base URL with a trailing slash, so relative endpoint paths append to it.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
            field: "api.base_url",
            message: e.to_string(),
        })?;
        if url.host_str().is_none() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url",
                message: "missing host".to_string(),
            });
        }
        Ok(url)
    }

    /// `host:port` of the API, used by the reachability probe.
    pub fn probe_address(&self) -> Result<String, ConfigError> {
        let url = self.base_url()?;
        let host = url.host_str().unwrap_or_default();
        let port = url
            .port_or_known_default()
            .ok_or(ConfigError::InvalidValue {
                field: "api.base_url",
                message: "cannot determine port".to_string(),
            })?;
        Ok(format!("{host}:{port}"))
    }
}

/// Reachability probe settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

fn default_probe_timeout_ms() -> u64 {
    1500
}

/// View actor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Capacity of each view's request channel
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

fn default_buffer_size() -> usize {
    32
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub connectivity: ConnectivityConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

impl AppConfig {
    /// Load from `path` (if given), apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                Self::from_yaml(&content)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Overrides fields from environment variables looked up through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.api.base_url = base_url;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_SECS) {
            self.api.timeout_secs =
                timeout
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: ENV_TIMEOUT_SECS,
                        message: format!("not a number: {timeout}"),
                    })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.base_url()?;
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs",
                message: "must be greater than zero".to_string(),
            });
        }
        if self.view.buffer_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "view.buffer_size",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}
