//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tessera_component::registry::ComponentRegistry;
use tessera_component::renderer::ComponentRenderer;
use tessera_core::config::AppConfig;
use tessera_core::traits::cache::CacheProvider;
use tessera_core::traits::view::ViewRenderer;
use tessera_core::types::route::RouteTable;
use tessera_plugin::hooks::dispatcher::HookDispatcher;
use tessera_plugin::manager::PluginManager;

use crate::dispatch::ControllerRegistry;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Cache provider.
    pub cache: Arc<dyn CacheProvider>,
    /// Hook dispatcher over the boot-populated registry.
    pub dispatcher: Arc<HookDispatcher>,
    /// Plugin manager.
    pub plugin_manager: Arc<PluginManager>,
    /// The immutable aggregated route table.
    pub route_table: Arc<RouteTable>,
    /// Wired controllers, resolved at dispatch time.
    pub controllers: Arc<ControllerRegistry>,
    /// Wired page components.
    pub components: Arc<ComponentRegistry>,
    /// Component renderer.
    pub renderer: Arc<ComponentRenderer>,
    /// View collaborator for templated responses.
    pub view: Arc<dyn ViewRenderer>,
}
