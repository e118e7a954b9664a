//! Router generation from the aggregated route table.
//!
//! The operational endpoints under `/api` are mounted statically; every
//! page route comes from the immutable route table and flows through the
//! dynamic dispatch handler.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::middleware as axum_middleware;
use axum::routing::{get, on, MethodFilter};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use tessera_core::types::route::RouteMethod;

use crate::dispatch::{axum_path, dispatch_entry};
use crate::handlers;
use crate::middleware;
use crate::state::AppState;

fn method_filter(method: RouteMethod) -> MethodFilter {
    match method {
        RouteMethod::Get => MethodFilter::GET,
        RouteMethod::Post => MethodFilter::POST,
        RouteMethod::Put => MethodFilter::PUT,
        RouteMethod::Delete => MethodFilter::DELETE,
        RouteMethod::Patch => MethodFilter::PATCH,
    }
}

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through every
/// route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/system/plugins", get(handlers::system_plugins))
        .route("/system/routes", get(handlers::system_routes))
        .route("/system/components", get(handlers::system_components));

    let mut page_routes = Router::new();
    for entry in state.route_table.entries() {
        let path = axum_path(&entry.pattern);
        debug!(
            method = %entry.method,
            path = %path,
            controller = %entry.controller,
            action = %entry.action,
            "Mounting route"
        );

        let route_entry = entry.clone();
        let handler = move |State(state): State<AppState>,
                            Path(params): Path<HashMap<String, String>>,
                            Query(query): Query<HashMap<String, String>>,
                            body: Bytes| {
            let entry = route_entry.clone();
            async move { dispatch_entry(state, entry, params, query, body).await }
        };

        page_routes = page_routes.route(&path, on(method_filter(entry.method), handler));
    }

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}
