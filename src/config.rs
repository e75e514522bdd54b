//! Server configuration
//!
//! Read from environment variables:
//! - `PORT` (default 3000)
//! - `BIND_ADDR` (default 0.0.0.0)
//! - `FACTOR_TABLE`: optional JSON factor table replacing the built-in one
//! - `MAX_BATCH_ITEMS` (default 1000)
//!
//! Log filtering uses `RUST_LOG`, falling back to `DEFAULT_LOG_FILTER`.

use anyhow::Result;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::factors::FactorTable;

/// Default log level: info for our crate, debug for HTTP tracing, warn for others
pub const DEFAULT_LOG_FILTER: &str = "waste_impact=info,tower_http=debug,axum=debug,warn";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_BATCH_ITEMS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub factor_table: Option<PathBuf>,
    pub max_batch_items: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            factor_table: None,
            max_batch_items: DEFAULT_MAX_BATCH_ITEMS,
        }
    }
}

impl ServerConfig {
    /// Configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary key lookup
    ///
    /// Unparsable values fall back to the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr),
            port: parse_or(&lookup, "PORT", defaults.port),
            factor_table: lookup("FACTOR_TABLE")
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            max_batch_items: parse_or(&lookup, "MAX_BATCH_ITEMS", defaults.max_batch_items),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Load the configured factor table, or the built-in one
    pub fn load_factor_table(&self) -> Result<FactorTable> {
        match &self.factor_table {
            Some(path) => FactorTable::load(path),
            None => Ok(FactorTable::default()),
        }
    }

    /// Log the effective configuration
    pub fn log(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  BIND_ADDR: {}", self.bind_addr);
        tracing::info!("  PORT: {}", self.port);
        tracing::info!(
            "  FACTOR_TABLE: {}",
            self.factor_table
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string())
        );
        tracing::info!("  MAX_BATCH_ITEMS: {}", self.max_batch_items);
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring invalid {}='{}', using {}", key, raw, default);
                default
            }
        },
    }
}
