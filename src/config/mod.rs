//! Client configuration file support
//!
//! A `ClientConfig` is loaded from TOML (by default
//! `~/.config/proxyscrape/config.toml`), then environment overrides are
//! applied on top.

mod defaults;

pub use defaults::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};

use crate::core::target::{parse_proxy_target, ProxyCheckTarget};
use crate::core::transport::RequestConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const BASE_URL_ENV: &str = "PROXYSCRAPE_BASE_URL";
pub const TIMEOUT_ENV: &str = "PROXYSCRAPE_TIMEOUT_MS";
pub const UPSTREAM_PROXY_ENV: &str = "PROXYSCRAPE_UPSTREAM_PROXY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config read error: {0}")]
    Read(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Config directory not found")]
    ConfigDirNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// List endpoint
    pub base_url: String,
    /// Default request timeout in milliseconds
    pub timeout_ms: u64,
    /// Route list requests through this proxy, e.g. `socks5://127.0.0.1:1080`
    pub upstream_proxy: Option<String>,
    /// Extra headers sent with every list request
    pub headers: HashMap<String, String>,
}

impl ClientConfig {
    /// `~/.config/proxyscrape/config.toml` (platform config dir)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
        Ok(dir.join("proxyscrape").join("config.toml"))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the default configuration to `path` unless it already exists
    pub fn init(path: &Path) -> Result<bool, ConfigError> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&Self::default())?;
        std::fs::write(path, content)?;
        Ok(true)
    }

    /// Apply `PROXYSCRAPE_*` environment overrides
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.base_url = base_url.trim().to_string();
            }
        }

        if let Ok(timeout) = std::env::var(TIMEOUT_ENV) {
            self.timeout_ms = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: TIMEOUT_ENV.to_string(),
                    value: timeout.clone(),
                })?;
        }

        if let Ok(proxy) = std::env::var(UPSTREAM_PROXY_ENV) {
            self.upstream_proxy = (!proxy.trim().is_empty()).then(|| proxy.trim().to_string());
        }

        self.check()?;
        Ok(self)
    }

    /// Validate values that would otherwise fail at request time
    pub fn check(&self) -> Result<(), ConfigError> {
        if url::Url::parse(&self.base_url).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "base_url".to_string(),
                value: self.base_url.clone(),
            });
        }

        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_ms".to_string(),
                value: "0".to_string(),
            });
        }

        if let Some(proxy) = &self.upstream_proxy {
            if parse_proxy_target(&ProxyCheckTarget::from(proxy.as_str())).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: "upstream_proxy".to_string(),
                    value: proxy.clone(),
                });
            }
        }

        Ok(())
    }

    /// Client-level request configuration derived from this file
    pub fn request_config(&self) -> RequestConfig {
        let config = self
            .headers
            .iter()
            .fold(RequestConfig::default(), |config, (name, value)| {
                config.with_header(name.as_str(), value.as_str())
            });

        RequestConfig {
            timeout_ms: Some(self.timeout_ms),
            proxy: self
                .upstream_proxy
                .as_deref()
                .and_then(|proxy| parse_proxy_target(&ProxyCheckTarget::from(proxy))),
            ..config
        }
    }
}
