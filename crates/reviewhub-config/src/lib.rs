//! Server configuration sourced from the process environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::debug;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/dummy_data.csv";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_LOG_FILTER: &str = "info";

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid PORT value: {0:?}")]
    InvalidPort(String),

    #[error("Invalid listen address: {0}")]
    InvalidAddr(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Source CSV. `None` when `DATA_PATH` is set but empty, which leaves the
    /// loader with nothing to read.
    pub data_path: Option<PathBuf>,
    pub static_dir: PathBuf,
    /// Tracing filter directive, from `RUST_LOG`.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            data_path: Some(PathBuf::from(DEFAULT_DATA_PATH)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            log_filter: DEFAULT_LOG_FILTER.into(),
        }
    }
}

impl ServerConfig {
    /// Reads `.env` (if any) and then the process environment.
    ///
    /// Call this before installing the tracing subscriber so that a
    /// `RUST_LOG` set in `.env` reaches [`ServerConfig::log_filter`].
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };

        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let data_path = match lookup("DATA_PATH") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(PathBuf::from(raw)),
            None => defaults.data_path,
        };

        let static_dir = lookup("STATIC_DIR")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let log_filter = lookup("RUST_LOG")
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        let config = Self {
            host,
            port,
            data_path,
            static_dir,
            log_filter,
        };
        debug!(?config, "Resolved server configuration");
        Ok(config)
    }

    /// Socket address to bind.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddr(addr))
    }
}
