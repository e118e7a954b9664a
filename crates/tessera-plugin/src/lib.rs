//! # tessera-plugin
//!
//! Extension composition framework for Tessera. Provides:
//!
//! - Hook registry with priority-ordered, boot-phase-only subscription
//! - Hook dispatcher folding value transforms over subscriber chains
//! - Plugin registration lifecycle with partial-failure tolerance
//! - Route table and provider aggregation over the `add-routes` and
//!   `add-providers` extension points
//! - Optional dynamic loading via `libloading`

pub mod aggregate;
pub mod hooks;
pub mod loader;
pub mod macros;
pub mod manager;
pub mod prelude;
pub mod registry;

pub use aggregate::{ProviderAggregator, RouteAggregator};
pub use hooks::args::HookArgs;
pub use hooks::dispatcher::{HookDispatcher, TriggerResult};
pub use hooks::point::HookPoint;
pub use hooks::registry::HookRegistry;
pub use hooks::transform::{Contribution, HookTransform, HookValue};
pub use manager::PluginManager;
pub use registry::{Plugin, PluginInfo, PluginRegistry};
