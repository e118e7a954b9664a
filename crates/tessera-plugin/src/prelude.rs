//! Prelude for plugin authors.

pub use async_trait::async_trait;

pub use crate::hooks::args::HookArgs;
pub use crate::hooks::point::HookPoint;
pub use crate::hooks::registry::HookRegistry;
pub use crate::hooks::transform::{
    provider_fn, route_fn, value_fn, Contribution, HookTransform, HookValue, ProviderTransform,
    RouteTransform, ValueTransform,
};
pub use crate::registry::{Plugin, PluginInfo};

pub use tessera_core::types::provider::{ProviderBinding, ProviderEntry};
pub use tessera_core::types::route::{RouteEntry, RouteMethod};
pub use tessera_core::{AppError, AppResult};

pub use crate::plugin_info;
