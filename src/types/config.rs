//! Configuration structures.
//!
//! Configuration is loaded from an optional JSON file and then overridden
//! by `SECFORGE_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::types::{Error, Result};

/// Global configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// MCP server identity.
    #[serde(default)]
    pub server: ServerConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Remote tag fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
}

impl Config {
    /// Load configuration from `path` (if given) and apply environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::config(format!("cannot read {}: {}", path.display(), e))
                })?;
                serde_json::from_str(&raw).map_err(|e| {
                    Error::config(format!("invalid config {}: {}", path.display(), e))
                })?
            }
            None => Config::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `SECFORGE_*` overrides from a key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("SECFORGE_LOG_LEVEL") {
            self.observability.log_level = level;
        }
        if let Some(format) = lookup("SECFORGE_LOG_FORMAT") {
            self.observability.json_logs = format.eq_ignore_ascii_case("json");
        }
        if let Some(api) = lookup("SECFORGE_GITHUB_API") {
            self.fetch.api_base = api;
        }
        if let Some(secs) = lookup("SECFORGE_FETCH_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::config(format!("SECFORGE_FETCH_TIMEOUT_SECS must be an integer, got '{}'", secs))
            })?;
            self.fetch.timeout = Duration::from_secs(secs);
        }
        Ok(())
    }
}

/// MCP server identity reported during `initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server name shown to MCP clients.
    pub name: String,

    /// Server version.
    pub version: String,

    /// MCP protocol revision announced to clients.
    pub protocol_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "secforge".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            protocol_version: "2024-11-05".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Remote tag fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// GitHub REST API base URL.
    pub api_base: String,

    /// Repository queried when the caller does not name one.
    pub default_repository: String,

    /// Upper bound on the whole request.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// User-Agent header (GitHub rejects requests without one).
    pub user_agent: String,

    /// Maximum number of tags listed in a response.
    pub max_tags: usize,

    /// Maximum number of tags read from the API when a filter is applied.
    pub max_scanned_tags: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            default_repository: "projectdiscovery/nuclei-templates".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: format!("secforge/{}", env!("CARGO_PKG_VERSION")),
            max_tags: 100,
            max_scanned_tags: 1000,
        }
    }
}
