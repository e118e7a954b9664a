//! Built-in operational handlers (health + system introspection).

use axum::extract::State;
use axum::Json;
use serde_json::json;

use crate::dto::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let plugins = state.plugin_manager.plugin_registry().count().await;

    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        plugins,
        routes: state.route_table.len(),
    }))
}

/// GET /api/system/plugins
pub async fn system_plugins(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    let plugins = state.plugin_manager.plugin_registry().list().await;
    Json(ApiResponse::ok(json!({ "plugins": plugins })))
}

/// GET /api/system/routes
///
/// Exposes the effective table plus shadowed entries so operators can spot
/// route conflicts.
pub async fn system_routes(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(json!({
        "routes": state.route_table.entries(),
        "shadowed": state.route_table.shadowed(),
    })))
}

/// GET /api/system/components
pub async fn system_components(
    State(state): State<AppState>,
) -> Json<ApiResponse<serde_json::Value>> {
    let metas: Vec<_> = state
        .components
        .names()
        .into_iter()
        .filter_map(|name| state.components.get(name).map(|c| c.meta()))
        .collect();
    Json(ApiResponse::ok(json!({ "components": metas })))
}
