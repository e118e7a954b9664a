//! Component registry — name → component, wired from provider bindings.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use tessera_core::traits::component::Component;
use tessera_core::types::provider::{ProviderBinding, ProviderEntry};

/// Immutable registry of wired page components.
///
/// Built once at bootstrap from the collected provider entries.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: HashMap<String, Arc<dyn Component>>,
}

impl ComponentRegistry {
    /// Builds the registry from collected provider entries, keeping the
    /// component bindings.
    pub fn from_providers(providers: &[ProviderEntry]) -> Self {
        let mut components = HashMap::new();
        for entry in providers {
            if let ProviderBinding::Component(component) = &entry.binding {
                components.insert(entry.name.clone(), Arc::clone(component));
            }
        }
        info!(components = components.len(), "Component registry built");
        Self { components }
    }

    /// Looks up a component by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Component>> {
        self.components.get(name)
    }

    /// All registered component names, sorted for stable output.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no components are registered.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
