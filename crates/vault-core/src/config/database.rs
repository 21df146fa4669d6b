//! Database configuration.

use serde::{Deserialize, Serialize};

/// PostgreSQL pool settings.
///
/// Only `url` is required; the pool sizing knobs default to values that
/// suit a single ImageVault instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections kept open when idle.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// How long to wait for a free connection before giving up.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_alone_is_enough() {
        let config: DatabaseConfig =
            serde_json::from_str(r#"{"url": "postgres://localhost/imagevault"}"#).unwrap();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout_seconds, 5);
    }
}
