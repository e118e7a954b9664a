//! Plugin registry — stores loaded plugin instances and metadata.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use tessera_core::result::AppResult;

use crate::hooks::registry::HookRegistry;

/// Metadata about a loaded plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Author or maintainer.
    pub author: String,
    /// Plugin category (e.g. `"content"`, `"commerce"`).
    pub category: String,
    /// Load priority (lower = loaded first).
    pub priority: i32,
    /// Whether the plugin is currently enabled.
    pub enabled: bool,
}

/// Runtime status of a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginStatus {
    /// Registered and serving.
    Active,
    /// Known but disabled.
    Inactive,
    /// Registration failed; the plugin is isolated.
    Failed,
}

/// Whether a plugin's entry point has been invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationState {
    /// Discovered, entry point not yet invoked.
    Unregistered,
    /// Entry point invoked (successfully or not).
    Registered,
}

/// Trait that all plugins implement.
///
/// `register` is the single entry point, invoked exactly once per process
/// lifetime. Its only legal actions are hook subscriptions; it must not
/// trigger extension points.
#[async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Subscribes this plugin's transforms to the extension points it
    /// contributes to (classically `add-routes` and `add-providers`).
    async fn register(&self, hooks: &HookRegistry) -> AppResult<()>;
}

#[derive(Debug)]
struct PluginHandle {
    plugin: Arc<dyn Plugin>,
    info: PluginInfo,
    status: PluginStatus,
    registration: RegistrationState,
}

/// Registry of all discovered plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: RwLock<HashMap<String, PluginHandle>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a discovered plugin in the unregistered state.
    ///
    /// Returns `false` when the id is already known (re-scan), leaving the
    /// existing handle untouched.
    pub async fn insert(&self, plugin: Arc<dyn Plugin>) -> bool {
        let info = plugin.info();
        let id = info.id.clone();

        let mut plugins = self.plugins.write().await;
        if plugins.contains_key(&id) {
            return false;
        }

        info!(plugin_id = %id, name = %info.name, version = %info.version, "Plugin discovered");
        plugins.insert(
            id,
            PluginHandle {
                plugin,
                info,
                status: PluginStatus::Inactive,
                registration: RegistrationState::Unregistered,
            },
        );
        true
    }

    /// Marks a plugin as registered and active.
    pub async fn mark_registered(&self, plugin_id: &str) {
        let mut plugins = self.plugins.write().await;
        if let Some(handle) = plugins.get_mut(plugin_id) {
            handle.registration = RegistrationState::Registered;
            handle.status = PluginStatus::Active;
        }
    }

    /// Marks a plugin as failed and disables it.
    pub async fn mark_failed(&self, plugin_id: &str) {
        let mut plugins = self.plugins.write().await;
        if let Some(handle) = plugins.get_mut(plugin_id) {
            handle.registration = RegistrationState::Registered;
            handle.status = PluginStatus::Failed;
            handle.info.enabled = false;
        }
    }

    /// Gets a plugin instance by id.
    pub async fn get(&self, plugin_id: &str) -> Option<Arc<dyn Plugin>> {
        let plugins = self.plugins.read().await;
        plugins.get(plugin_id).map(|h| Arc::clone(&h.plugin))
    }

    /// The registration state of a plugin.
    pub async fn registration_state(&self, plugin_id: &str) -> Option<RegistrationState> {
        let plugins = self.plugins.read().await;
        plugins.get(plugin_id).map(|h| h.registration)
    }

    /// The runtime status of a plugin.
    pub async fn status(&self, plugin_id: &str) -> Option<PluginStatus> {
        let plugins = self.plugins.read().await;
        plugins.get(plugin_id).map(|h| h.status)
    }

    /// Lists all plugin metadata, sorted by load priority.
    pub async fn list(&self) -> Vec<PluginInfo> {
        let plugins = self.plugins.read().await;
        let mut infos: Vec<PluginInfo> = plugins.values().map(|h| h.info.clone()).collect();
        infos.sort_by_key(|info| info.priority);
        infos
    }

    /// Number of discovered plugins.
    pub async fn count(&self) -> usize {
        let plugins = self.plugins.read().await;
        plugins.len()
    }

    /// Whether a plugin id is known.
    pub async fn contains(&self, plugin_id: &str) -> bool {
        let plugins = self.plugins.read().await;
        plugins.contains_key(plugin_id)
    }

    /// Whether a plugin is enabled.
    pub async fn is_enabled(&self, plugin_id: &str) -> bool {
        let plugins = self.plugins.read().await;
        plugins
            .get(plugin_id)
            .map(|h| h.info.enabled)
            .unwrap_or(false)
    }
}
