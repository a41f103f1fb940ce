//! Build [`Config`] from environment variables (after `.env` is loaded).

use crate::config::types::{Config, StoreConfig, DEFAULT_LISTEN_ADDR, DEFAULT_MAX_CONNECTIONS};
use crate::error::ConfigError;
use std::net::SocketAddr;

pub const ENV_STORE: &str = "TODO_STORE";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
pub const ENV_LISTEN_ADDR: &str = "LISTEN_ADDR";

impl Config {
    /// Read `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    /// Backend defaults to postgres when `DATABASE_URL` is set, memory otherwise.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let listen_addr = match get(ENV_LISTEN_ADDR) {
            Some(v) => v.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidValue {
                var: ENV_LISTEN_ADDR,
                value: v,
            })?,
            None => DEFAULT_LISTEN_ADDR,
        };

        let database_url = get(ENV_DATABASE_URL);
        let backend = get(ENV_STORE).map(|v| v.to_ascii_lowercase());
        let use_postgres = match backend.as_deref() {
            Some("memory") => false,
            Some("postgres") | Some("postgresql") => true,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
            None => database_url.is_some(),
        };

        let store = if use_postgres {
            let database_url = database_url.ok_or(ConfigError::MissingVar(ENV_DATABASE_URL))?;
            let max_connections = match get(ENV_MAX_CONNECTIONS) {
                Some(v) => match v.parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            var: ENV_MAX_CONNECTIONS,
                            value: v,
                        })
                    }
                },
                None => DEFAULT_MAX_CONNECTIONS,
            };
            StoreConfig::Postgres {
                database_url,
                max_connections,
            }
        } else {
            StoreConfig::Memory
        };

        Ok(Config { listen_addr, store })
    }
}
