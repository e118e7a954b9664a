//! Application builder — boots the composition pipeline and wires the
//! Axum app.
//!
//! Boot order matters: plugins must register before the route table is
//! built, and providers are collected after registration so the controller
//! and component registries see every contribution.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use serde_json::json;

use tessera_cache::MemoryCacheProvider;
use tessera_component::registry::ComponentRegistry;
use tessera_component::renderer::ComponentRenderer;
use tessera_core::config::AppConfig;
use tessera_core::error::AppError;
use tessera_core::result::AppResult;
use tessera_core::traits::cache::CacheProvider;
use tessera_core::traits::controller::Controller;
use tessera_core::traits::view::ViewRenderer;
use tessera_core::types::component::Payload;
use tessera_core::types::request::{ActionRequest, ActionResponse};
use tessera_core::types::route::{RouteEntry, RouteMethod};
use tessera_plugin::aggregate::{ProviderAggregator, RouteAggregator};
use tessera_plugin::hooks::dispatcher::HookDispatcher;
use tessera_plugin::hooks::registry::HookRegistry;
use tessera_plugin::manager::PluginManager;
use tessera_plugin::registry::Plugin;

use plugin_blog::BlogPlugin;
use plugin_orders::OrdersPlugin;

use crate::dispatch::ControllerRegistry;
use crate::router::build_router;
use crate::state::AppState;
use crate::view::JsonView;

/// The core's own route contributions.
fn core_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new(RouteMethod::Get, "/", "HomeController", "index").owned_by("core"),
    ]
}

/// The core's landing controller.
#[derive(Debug, Default)]
struct HomeController;

#[async_trait]
impl Controller for HomeController {
    fn name(&self) -> &str {
        "HomeController"
    }

    async fn invoke(&self, action: &str, _request: ActionRequest) -> AppResult<ActionResponse> {
        match action {
            "index" => {
                let mut payload = Payload::new();
                payload.insert("application".to_string(), json!("tessera"));
                payload.insert(
                    "version".to_string(),
                    json!(env!("CARGO_PKG_VERSION")),
                );
                Ok(ActionResponse::with_payload(payload))
            }
            other => Err(AppError::not_found(format!(
                "HomeController has no action '{other}'"
            ))),
        }
    }
}

/// Boots the full composition pipeline and returns the shared state.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    // ── Step 1: Cache ────────────────────────────────────────────
    let cache: Arc<dyn CacheProvider> = Arc::new(MemoryCacheProvider::new(
        &config.cache.memory,
        config.cache.default_ttl_seconds,
    ));

    // ── Step 2: Hook registry + dispatcher + renderer ────────────
    let hooks = Arc::new(HookRegistry::new());
    let dispatcher = Arc::new(HookDispatcher::new(Arc::clone(&hooks)));
    let renderer = Arc::new(ComponentRenderer::new(
        Arc::clone(&dispatcher),
        Arc::clone(&cache),
        Duration::from_secs(config.cache.component_ttl_seconds),
    ));

    // ── Step 3: Plugins, in stable discovery order ───────────────
    let plugin_manager = Arc::new(PluginManager::new(Arc::clone(&hooks)));
    let plugins: Vec<Arc<dyn Plugin>> = vec![
        Arc::new(BlogPlugin::new(Arc::clone(&renderer))),
        Arc::new(OrdersPlugin::new()),
    ];
    plugin_manager.load_all(plugins).await;

    // ── Step 4: Route table (after every plugin has registered) ──
    let route_aggregator = RouteAggregator::new(Arc::clone(&dispatcher));
    let route_table = route_aggregator.build(core_routes()).await;

    // ── Step 5: Providers → controller/component registries ──────
    let providers = ProviderAggregator::new(Arc::clone(&dispatcher))
        .collect()
        .await;

    let mut controllers = ControllerRegistry::new();
    controllers.insert(Arc::new(HomeController));
    controllers.extend_from_providers(&providers);

    let components = ComponentRegistry::from_providers(&providers);

    let view: Arc<dyn ViewRenderer> = Arc::new(JsonView::new());

    Ok(AppState {
        config: Arc::new(config),
        cache,
        dispatcher,
        plugin_manager,
        route_table,
        controllers: Arc::new(controllers),
        components: Arc::new(components),
        renderer,
        view,
    })
}

/// Builds the complete Axum application from booted state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Tessera server with the given configuration.
pub async fn run_server(config: AppConfig) -> AppResult<()> {
    let host = config.server.host.clone();
    let port = config.server.port;

    let state = build_state(config).await?;
    let app = build_app(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Tessera server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Tessera server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
