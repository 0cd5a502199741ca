//! Configuration loading and management.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Host configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bot identity.
    pub server: ServerConfig,
    /// HTTP endpoint blocks, one listener each. When empty, the binary
    /// attaches a single endpoint with defaults.
    #[serde(default)]
    pub http: Vec<HttpConfig>,
}

/// Bot identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bot name, used in logs.
    pub name: String,
    /// Emit a per-request access log line.
    #[serde(default)]
    pub logging: bool,
}

/// HTTP endpoint configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,
    /// Port to bind to; 0 requests an OS-assigned free port.
    #[serde(default)]
    pub port: u16,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
