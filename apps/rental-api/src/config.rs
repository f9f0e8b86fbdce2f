//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                    | Default     |
//! |-----------------------------|-------------|
//! | `RENTAL_BIND_ADDR`          | `127.0.0.1` |
//! | `RENTAL_PORT`               | `5000`      |
//! | `RENTAL_DB_PATH`            | `rental.db` |
//! | `RENTAL_DB_MAX_CONNECTIONS` | `5`         |
//! | `RENTAL_ALLOW_RESET`        | `true`      |

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use rental_db::DbConfig;

/// Rental API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: IpAddr,

    /// HTTP port
    pub port: u16,

    /// SQLite database file, or `:memory:`
    pub database_path: PathBuf,

    /// Connection pool size
    pub max_connections: u32,

    /// Mount `GET /api/reset-db`
    pub allow_reset: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = ApiConfig {
            bind_addr: parse_var(&lookup, "RENTAL_BIND_ADDR", "127.0.0.1")?,
            port: parse_var(&lookup, "RENTAL_PORT", "5000")?,
            database_path: lookup("RENTAL_DB_PATH")
                .unwrap_or_else(|| "rental.db".to_string())
                .into(),
            max_connections: parse_var(&lookup, "RENTAL_DB_MAX_CONNECTIONS", "5")?,
            allow_reset: parse_var(&lookup, "RENTAL_ALLOW_RESET", "true")?,
        };

        if config.max_connections == 0 {
            return Err(ConfigError::InvalidValue("RENTAL_DB_MAX_CONNECTIONS".to_string()));
        }
        if config.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("RENTAL_DB_PATH".to_string()));
        }

        Ok(config)
    }

    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Pool configuration for the database layer.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.max_connections)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError> {
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
