//! Configuration types and loading
//!
//! Everything is read once at process start. The backend mode flag selects
//! which `UserStore` implementation the process talks to for its lifetime.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:3001";
pub const DEFAULT_DATA_DIR: &str = ".userdir";

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Backend selection and remote endpoint
    pub store: StoreConfig,

    /// Development server configuration
    pub server: ServerConfig,
}

/// Which backend serves user records
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    #[default]
    Remote,
    Mock,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub mode: BackendMode,
    /// Base URL of the remote REST endpoint
    pub api_url: String,
    pub mock: MockConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MockConfig {
    /// Directory holding the persisted mock blob
    pub data_dir: PathBuf,
    pub latency: MockLatency,
}

/// Simulated network latency for mock mode, in milliseconds
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct MockLatency {
    pub list_ms: u64,
    pub lookup_ms: u64,
    pub write_ms: u64,
}

impl MockLatency {
    pub const fn uniform(ms: u64) -> Self {
        Self {
            list_ms: ms,
            lookup_ms: ms,
            write_ms: ms,
        }
    }

    pub const fn none() -> Self {
        Self::uniform(0)
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            list_ms: 500,
            lookup_ms: 300,
            write_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Remote,
            api_url: DEFAULT_API_URL.to_string(),
            mock: MockConfig {
                data_dir: PathBuf::from(DEFAULT_DATA_DIR),
                latency: MockLatency::default(),
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3001,
            },
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl std::fmt::Display) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<ConfigError> for crate::error::UdError {
    fn from(err: ConfigError) -> Self {
        crate::error::UdError::Config(err.to_string())
    }
}

fn parse_bool(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("USE_MOCK_API") {
            config.store.mode = if parse_bool(&v) {
                BackendMode::Mock
            } else {
                BackendMode::Remote
            };
        }
        if let Some(url) = lookup("API_URL").filter(|v| !v.trim().is_empty()) {
            config.store.api_url = url;
        }
        if let Some(dir) = lookup("USERDIR_DATA_DIR") {
            config.store.mock.data_dir = PathBuf::from(dir);
        }
        if let Some(ms) = lookup("USERDIR_MOCK_LATENCY_MS") {
            let ms = ms
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid("USERDIR_MOCK_LATENCY_MS", e))?;
            config.store.mock.latency = MockLatency::uniform(ms);
        }

        // Server
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::invalid("PORT", e))?;
        }

        config.store.validate()?;
        Ok(config)
    }

    /// Get the server address
    pub fn server_addr(&self) -> std::net::SocketAddr {
        use std::net::SocketAddr;
        let ip: std::net::IpAddr = self.server.host.parse().unwrap_or([0, 0, 0, 0].into());
        SocketAddr::new(ip, self.server.port)
    }
}

impl StoreConfig {
    /// Reject a remote base URL that cannot be joined with resource paths
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_url).map_err(|e| ConfigError::invalid("API_URL", e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::invalid(
                "API_URL",
                format!("unsupported scheme {}", url.scheme()),
            ));
        }
        Ok(())
    }

    pub fn is_mock(&self) -> bool {
        self.mode == BackendMode::Mock
    }
}
