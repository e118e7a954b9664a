//! Extension point identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An extension point, identified by `(scope, name)`.
///
/// The scope is the owning module or class (e.g. a component name); the
/// name is the event. Components mint their own per-class result points at
/// runtime, so this is an open identifier rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HookPoint {
    scope: String,
    name: String,
}

impl HookPoint {
    /// Create an extension point.
    pub fn new(scope: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            name: name.into(),
        }
    }

    /// The `add-routes` point, triggered once by the route aggregator.
    pub fn add_routes() -> Self {
        Self::new("router", "add-routes")
    }

    /// The `add-providers` point, triggered once by the bootstrap.
    pub fn add_providers() -> Self {
        Self::new("app", "add-providers")
    }

    /// The per-component `results` point.
    pub fn component_results(component: &str) -> Self {
        Self::new(component, "results")
    }

    /// The owning scope.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.scope, self.name)
    }
}
