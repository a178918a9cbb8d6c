use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DIST_DIR: &str = "dist";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    BadPort(String),
}

/// Runtime settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding the built frontend (`index.html` plus `assets/`).
    pub dist_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::BadPort(raw))?,
            None => DEFAULT_PORT,
        };
        let dist_dir = lookup("DIST_DIR")
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DIST_DIR.to_string());
        Ok(Self {
            port,
            dist_dir: PathBuf::from(dist_dir),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}
