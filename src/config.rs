//! Environment configuration
//!
//! Values come from the process environment, after loading a `.env` file from
//! the working directory if one exists. Command-line flags override them.
//!
//! | Variable               | Default              |
//! |------------------------|----------------------|
//! | `SKILLGRID_LOG`        | `info`               |
//! | `SKILLGRID_HOST`       | `127.0.0.1`          |
//! | `SKILLGRID_PORT`       | `3001`               |
//! | `SKILLGRID_REPORT_DIR` | `skillgrid-reports`  |

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_REPORT_DIR: &str = "skillgrid-reports";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SKILLGRID_PORT must be a valid u16, got {0:?}")]
    InvalidPort(String),

    #[error("SKILLGRID_HOST must parse to an IPv4 or IPv6 address")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    pub server: ServerConfig,
    pub report_dir: PathBuf,
}

/// Where `skillgrid serve` listens.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup("SKILLGRID_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let host = lookup("SKILLGRID_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("SKILLGRID_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let report_dir = lookup("SKILLGRID_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_DIR));

        Ok(Self {
            log_level,
            server: ServerConfig { host, port },
            report_dir,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
        }
    }
}
