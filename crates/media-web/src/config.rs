//! Configuration loaded from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 4000;

/// Media server configuration.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Root of the per-room image folders.
    pub images_dir: PathBuf,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            images_dir: PathBuf::from("images"),
        }
    }
}

impl MediaConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `MEDIA_ADDR` | Bind host | `0.0.0.0` |
    /// | `PORT` | Listen port | `4000` |
    /// | `IMAGES_DIR` | Image root | `images` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host: IpAddr = match env::var("MEDIA_ADDR") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddr(value))?,
            Err(_) => defaults.addr.ip(),
        };

        let port: u16 = match env::var("PORT") {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            Err(_) => DEFAULT_PORT,
        };

        let images_dir = env::var("IMAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.images_dir);

        Ok(Self {
            addr: SocketAddr::new(host, port),
            images_dir,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid MEDIA_ADDR: {0:?}")]
    InvalidAddr(String),

    #[error("Invalid PORT: {0:?}")]
    InvalidPort(String),
}
