//! Process configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BAZAAR_BIND_ADDR` | `0.0.0.0:8080` |
//! | `BAZAAR_STORE` | `memory` (`memory` or `postgres`) |
//! | `DATABASE_URL` | required for `postgres` |
//! | `BAZAAR_DB_MAX_CONNECTIONS` | `5` |
//! | `LOG_FORMAT` | `json` (`json` or `pretty`) |

use core::str::FromStr;
use std::net::SocketAddr;

use bazaar_observability::LogFormat;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Which record store backs the three collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing environment variable '{0}'")]
    Missing(&'static str),

    #[error("invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_or(&lookup, "BAZAAR_BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let log_format = parse_or(&lookup, "LOG_FORMAT", "json")?;

        let store_kind = lookup("BAZAAR_STORE").unwrap_or_else(|| "memory".to_string());
        let store = match store_kind.trim().to_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
                max_connections: parse_or(
                    &lookup,
                    "BAZAAR_DB_MAX_CONNECTIONS",
                    &DEFAULT_DB_MAX_CONNECTIONS.to_string(),
                )?,
            },
            _ => {
                return Err(ConfigError::Invalid {
                    var: "BAZAAR_STORE",
                    value: store_kind,
                    reason: "expected 'memory' or 'postgres'".to_string(),
                });
            }
        };

        Ok(Self {
            bind_addr,
            store,
            log_format,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            store: StoreBackend::Memory,
            log_format: LogFormat::Json,
        }
    }
}

fn parse_or<T, F>(lookup: &F, var: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(var).unwrap_or_else(|| default.to_string());
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        var,
        value: raw.clone(),
        reason: e.to_string(),
    })
}
