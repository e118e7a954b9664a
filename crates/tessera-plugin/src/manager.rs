//! Plugin manager — invokes each plugin's registration entry point exactly
//! once, in a stable discovery order, isolating failures per plugin.

use std::sync::Arc;

use tracing::{debug, error, info};

use tessera_core::error::AppError;
use tessera_core::result::AppResult;

use crate::hooks::registry::HookRegistry;
use crate::registry::{Plugin, PluginInfo, PluginRegistry, RegistrationState};

/// Manages plugin discovery and one-shot registration.
#[derive(Debug)]
pub struct PluginManager {
    plugins: Arc<PluginRegistry>,
    hooks: Arc<HookRegistry>,
}

impl PluginManager {
    /// Creates a plugin manager over a shared hook registry.
    pub fn new(hooks: Arc<HookRegistry>) -> Self {
        Self {
            plugins: Arc::new(PluginRegistry::new()),
            hooks,
        }
    }

    /// Registers one plugin: invokes its entry point exactly once.
    ///
    /// Re-registering a known plugin id is a no-op (discovery may re-scan).
    /// A failing entry point marks the plugin failed and disabled; the error
    /// is returned for the caller's accounting but the application keeps
    /// booting.
    pub async fn register_plugin(&self, plugin: Arc<dyn Plugin>) -> AppResult<()> {
        let info = plugin.info();
        let id = info.id.clone();

        if !self.plugins.insert(Arc::clone(&plugin)).await {
            if self.plugins.registration_state(&id).await == Some(RegistrationState::Registered) {
                debug!(plugin_id = %id, "Plugin already registered; skipping");
                return Ok(());
            }
        }

        match plugin.register(&self.hooks).await {
            Ok(()) => {
                self.plugins.mark_registered(&id).await;
                info!(
                    plugin_id = %id,
                    name = %info.name,
                    version = %info.version,
                    "Plugin registered"
                );
                Ok(())
            }
            Err(e) => {
                self.plugins.mark_failed(&id).await;
                error!(
                    plugin_id = %id,
                    error = %e,
                    "Plugin registration failed; plugin disabled"
                );
                Err(AppError::plugin(format!(
                    "plugin '{id}' failed to register: {e}"
                )))
            }
        }
    }

    /// Registers all plugins in the given (stable) discovery order.
    ///
    /// Registration failures are isolated per plugin: the rest of the
    /// sequence still registers and the application still boots.
    pub async fn load_all(&self, plugins: Vec<Arc<dyn Plugin>>) -> Vec<PluginInfo> {
        for plugin in plugins {
            // Errors are already logged and the plugin marked failed.
            let _ = self.register_plugin(plugin).await;
        }

        let infos = self.plugins.list().await;
        info!(count = infos.len(), "Plugin load complete");
        infos
    }

    /// The shared hook registry.
    pub fn hooks(&self) -> &Arc<HookRegistry> {
        &self.hooks
    }

    /// The plugin registry.
    pub fn plugin_registry(&self) -> &Arc<PluginRegistry> {
        &self.plugins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::point::HookPoint;
    use crate::hooks::transform::{value_fn, Contribution, HookTransform};
    use crate::registry::PluginStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct CountingPlugin {
        id: &'static str,
        registrations: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Plugin for CountingPlugin {
        fn info(&self) -> PluginInfo {
            PluginInfo {
                id: self.id.to_string(),
                name: self.id.to_string(),
                version: "0.1.0".to_string(),
                description: String::new(),
                author: "test".to_string(),
                category: "test".to_string(),
                priority: 100,
                enabled: true,
            }
        }

        async fn register(&self, hooks: &HookRegistry) -> AppResult<()> {
            self.registrations.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::internal("broken plugin"));
            }
            hooks
                .subscribe(
                    HookPoint::new(self.id, "marker"),
                    self.id,
                    100,
                    HookTransform::Value(value_fn(|value, _args| {
                        Ok(Contribution::new(value.clone()))
                    })),
                )
                .await
        }
    }

    #[tokio::test]
    async fn test_registration_happens_exactly_once() {
        let manager = PluginManager::new(Arc::new(HookRegistry::new()));
        let registrations = Arc::new(AtomicUsize::new(0));
        let plugin = Arc::new(CountingPlugin {
            id: "once",
            registrations: Arc::clone(&registrations),
            fail: false,
        });

        manager.register_plugin(Arc::clone(&plugin) as Arc<dyn Plugin>).await.unwrap();
        manager.register_plugin(plugin as Arc<dyn Plugin>).await.unwrap();

        assert_eq!(registrations.load(Ordering::SeqCst), 1);
        assert_eq!(
            manager.plugin_registry().status("once").await,
            Some(PluginStatus::Active)
        );
    }

    #[tokio::test]
    async fn test_one_broken_plugin_does_not_stop_the_rest() {
        let manager = PluginManager::new(Arc::new(HookRegistry::new()));
        let registrations = Arc::new(AtomicUsize::new(0));

        let infos = manager
            .load_all(vec![
                Arc::new(CountingPlugin {
                    id: "good-a",
                    registrations: Arc::clone(&registrations),
                    fail: false,
                }),
                Arc::new(CountingPlugin {
                    id: "broken",
                    registrations: Arc::clone(&registrations),
                    fail: true,
                }),
                Arc::new(CountingPlugin {
                    id: "good-b",
                    registrations: Arc::clone(&registrations),
                    fail: false,
                }),
            ])
            .await;

        assert_eq!(infos.len(), 3);
        assert_eq!(
            manager.plugin_registry().status("broken").await,
            Some(PluginStatus::Failed)
        );
        assert!(!manager.plugin_registry().is_enabled("broken").await);
        assert_eq!(
            manager.plugin_registry().status("good-a").await,
            Some(PluginStatus::Active)
        );
        assert_eq!(
            manager.plugin_registry().status("good-b").await,
            Some(PluginStatus::Active)
        );
    }
}
