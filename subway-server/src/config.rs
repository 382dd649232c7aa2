//! Server configuration.

use std::net::SocketAddr;

use tracing::warn;

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "SUBWAY_ADDR";

/// Environment variable holding the static assets directory.
pub const STATIC_DIR_VAR: &str = "SUBWAY_STATIC_DIR";

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: String,
}

impl ServerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(bind_addr: SocketAddr, static_dir: impl Into<String>) -> Self {
        Self {
            bind_addr,
            static_dir: static_dir.into(),
        }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// missing or unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ADDR_VAR) {
            match raw.parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => warn!(
                    var = ADDR_VAR,
                    value = %raw,
                    error = %e,
                    "ignoring invalid listen address"
                ),
            }
        }
        if let Some(dir) = lookup(STATIC_DIR_VAR).filter(|d| !d.is_empty()) {
            config.static_dir = dir;
        }

        config
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: "static".to_string(),
        }
    }
}
