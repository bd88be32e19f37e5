//! Load-time configuration: where the profit service lives.
//!
//! Host and port have no defaults. They come from a TOML file and may be
//! overridden by `MAXPROFIT_HOST` / `MAXPROFIT_PORT`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HOST_ENV: &str = "MAXPROFIT_HOST";
pub const PORT_ENV: &str = "MAXPROFIT_PORT";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("server {field} is not configured (set it in the config file or {env})")]
    Missing {
        field: &'static str,
        env: &'static str,
    },

    #[error("invalid value for {env}: {value:?}")]
    InvalidEnv { env: &'static str, value: String },
}

/// Address of the profit service plus per-attempt transport timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Top-level settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
}

/// On-disk shape. Everything is optional so env overrides can fill the gaps.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    server: RawServer,
}

#[derive(Debug, Default, Deserialize)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
    request_timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from `path` (if it exists) and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
            Self::parse_raw(&content, path)?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using environment only");
            RawSettings::default()
        };

        let host = std::env::var(HOST_ENV).ok();
        let port = std::env::var(PORT_ENV).ok();
        Self::resolve(raw, host, port)
    }

    /// Parse settings from TOML text without consulting the environment.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw = Self::parse_raw(content, Path::new("<inline>"))?;
        Self::resolve(raw, None, None)
    }

    fn parse_raw(content: &str, path: &Path) -> Result<RawSettings, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn resolve(
        raw: RawSettings,
        host_env: Option<String>,
        port_env: Option<String>,
    ) -> Result<Self, ConfigError> {
        let host = host_env
            .filter(|h| !h.trim().is_empty())
            .or(raw.server.host)
            .filter(|h| !h.trim().is_empty())
            .ok_or(ConfigError::Missing {
                field: "host",
                env: HOST_ENV,
            })?;

        let port = match port_env {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnv {
                    env: PORT_ENV,
                    value,
                })?,
            None => raw.server.port.ok_or(ConfigError::Missing {
                field: "port",
                env: PORT_ENV,
            })?,
        };

        Ok(Self {
            server: ServerConfig {
                host,
                port,
                request_timeout_secs: raw
                    .server
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            },
        })
    }
}
