//! Provider descriptors contributed by plugins and consumed by the bootstrap.

use std::fmt;
use std::sync::Arc;

use crate::traits::component::Component;
use crate::traits::controller::Controller;

/// The concrete binding a provider entry carries.
///
/// The bootstrap consumes these to wire controllers into the dispatch
/// registry and components into the component registry.
#[derive(Clone)]
pub enum ProviderBinding {
    /// A controller exposed for route dispatch.
    Controller(Arc<dyn Controller>),
    /// A page component exposed for rendering.
    Component(Arc<dyn Component>),
}

impl ProviderBinding {
    /// Short kind label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Controller(_) => "controller",
            Self::Component(_) => "component",
        }
    }
}

impl fmt::Debug for ProviderBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProviderBinding::{}", self.kind())
    }
}

/// A named dependency binding contributed through the `add-providers`
/// extension point.
#[derive(Debug, Clone)]
pub struct ProviderEntry {
    /// Binding name, unique across the application (e.g. a controller name).
    pub name: String,
    /// Tag of the plugin that contributed this entry.
    pub owner: String,
    /// The wired binding.
    pub binding: ProviderBinding,
}

impl ProviderEntry {
    /// Create a controller provider entry.
    pub fn controller(
        name: impl Into<String>,
        owner: impl Into<String>,
        controller: Arc<dyn Controller>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            binding: ProviderBinding::Controller(controller),
        }
    }

    /// Create a component provider entry.
    pub fn component(
        name: impl Into<String>,
        owner: impl Into<String>,
        component: Arc<dyn Component>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            binding: ProviderBinding::Component(component),
        }
    }
}
