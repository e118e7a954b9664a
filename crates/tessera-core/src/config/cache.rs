//! Cache configuration.

use serde::{Deserialize, Serialize};

/// Cache provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache provider: currently only `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Default TTL in seconds for cached values.
    #[serde(default = "default_ttl")]
    pub default_ttl_seconds: u64,
    /// TTL in seconds for rendered component payloads.
    #[serde(default = "default_component_ttl")]
    pub component_ttl_seconds: u64,
    /// In-memory cache settings.
    #[serde(default)]
    pub memory: MemoryCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            default_ttl_seconds: default_ttl(),
            component_ttl_seconds: default_component_ttl(),
            memory: MemoryCacheConfig::default(),
        }
    }
}

/// In-memory cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Maximum number of entries.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Cache-level time-to-live in seconds.
    #[serde(default = "default_ttl")]
    pub time_to_live_seconds: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
            time_to_live_seconds: default_ttl(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_ttl() -> u64 {
    300
}

fn default_component_ttl() -> u64 {
    60
}

fn default_max_capacity() -> u64 {
    10_000
}
