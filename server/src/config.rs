//! Server configuration from the environment.
//!
//! `SERVER_PORT`, `SERVER_BIND` and `PUBLIC_DIR` override the defaults below.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Port the static file server listens on by default.
pub const SERVER_PORT: u16 = 80;

/// Address the server binds to by default. 0.0.0.0 works for both local runs and containers.
pub const SERVER_BIND_ADDR: &str = "0.0.0.0";

/// Directory (relative to the working directory) holding the page, the wasm build and assets.
pub const PUBLIC_DIR: &str = "public";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SERVER_PORT must be a port number, got {0:?}")]
    InvalidPort(String),
    #[error("SERVER_BIND must be an IP address, got {0:?}")]
    InvalidBindAddr(String),
    #[error("public directory {0:?} does not exist or is not a directory")]
    MissingPublicDir(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub public_dir: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => SERVER_PORT,
        };

        let bind = lookup("SERVER_BIND").unwrap_or_else(|| SERVER_BIND_ADDR.to_string());
        let ip: IpAddr = bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind.clone()))?;

        let public_dir = PathBuf::from(lookup("PUBLIC_DIR").unwrap_or_else(|| PUBLIC_DIR.to_string()));
        if !public_dir.is_dir() {
            return Err(ConfigError::MissingPublicDir(public_dir));
        }

        Ok(Self {
            bind_addr: SocketAddr::new(ip, port),
            public_dir,
        })
    }
}
