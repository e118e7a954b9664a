//! Plugin system configuration.

use serde::{Deserialize, Serialize};

/// Plugin system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Directories scanned for dynamic plugin shared libraries, in scan order.
    #[serde(default = "default_plugin_roots")]
    pub roots: Vec<String>,
    /// Whether to automatically load plugins on startup.
    #[serde(default = "default_true")]
    pub auto_load: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            roots: default_plugin_roots(),
            auto_load: default_true(),
        }
    }
}

fn default_plugin_roots() -> Vec<String> {
    vec!["./plugins".to_string()]
}

fn default_true() -> bool {
    true
}
