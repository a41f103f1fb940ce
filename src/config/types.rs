//! Process-wide configuration, built once at startup and passed explicitly.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Fixed container port.
pub const DEFAULT_LISTEN_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);

pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub store: StoreConfig,
}

/// Which backend holds the to-do table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreConfig {
    /// Ephemeral; lost on restart.
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

impl StoreConfig {
    pub fn backend_name(&self) -> &'static str {
        match self {
            StoreConfig::Memory => "memory",
            StoreConfig::Postgres { .. } => "postgres",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR,
            store: StoreConfig::Memory,
        }
    }
}
