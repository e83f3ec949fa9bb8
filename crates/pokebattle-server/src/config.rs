//! RON configuration parsing for the battle server

use pokebattle_core::BattleConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding [`Config::listen`].
pub const ENV_LISTEN: &str = "POKEBATTLE_LISTEN";
/// Environment variable overriding [`Config::database`].
pub const ENV_DATABASE: &str = "POKEBATTLE_DATABASE";

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Listen address (e.g., "0.0.0.0:8080")
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Database file; in-memory when absent
    #[serde(default)]
    pub database: Option<String>,
    /// Creature catalog client
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Battle sampling
    #[serde(default)]
    pub battle: BattleConfig,
    /// Catalog cache; disabled when absent
    #[serde(default)]
    pub cache: Option<CacheConfig>,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

/// Catalog client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// Page size used to fetch the whole index in one request
    #[serde(default = "default_index_limit")]
    pub index_limit: u64,
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_timeout() -> u64 {
    5000
}

fn default_index_limit() -> u64 {
    100_000
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout(),
            index_limit: default_index_limit(),
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum cached creature details
    #[serde(default = "default_cache_entries")]
    pub max_entries: u64,
    /// TTL in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

fn default_cache_entries() -> u64 {
    2048
}

fn default_cache_ttl() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_cache_entries(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            database: None,
            catalog: CatalogConfig::default(),
            battle: BattleConfig::default(),
            cache: None,
        }
    }
}

impl Config {
    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }

    /// Parse and validate configuration from RON text
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            ron::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup, then re-validate
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(listen) = lookup(ENV_LISTEN) {
            self.listen = listen;
        }
        if let Some(database) = lookup(ENV_DATABASE) {
            self.database = (!database.is_empty()).then_some(database);
        }
        self.validate()
    }

    /// Parsed listen address
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen
            .parse()
            .map_err(|e| ConfigError::Validation(format!("listen '{}': {}", self.listen, e)))
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_addr()?;
        self.battle
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        if self.catalog.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "catalog base_url is empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}
