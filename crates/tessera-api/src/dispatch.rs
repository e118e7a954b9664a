//! Dynamic dispatch from aggregated route entries to wired controllers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

use tessera_core::error::AppError;
use tessera_core::traits::controller::Controller;
use tessera_core::types::provider::{ProviderBinding, ProviderEntry};
use tessera_core::types::request::ActionRequest;
use tessera_core::types::route::RouteEntry;

use crate::dto::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// Registry of wired controllers, keyed by controller name.
///
/// Populated at bootstrap from the core's own controllers plus the
/// collected provider bindings, then frozen behind an `Arc` in
/// [`AppState`].
#[derive(Debug, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, Arc<dyn Controller>>,
}

impl ControllerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a controller under its own name.
    pub fn insert(&mut self, controller: Arc<dyn Controller>) {
        self.controllers
            .insert(controller.name().to_string(), controller);
    }

    /// Adds every controller binding from collected provider entries.
    pub fn extend_from_providers(&mut self, providers: &[ProviderEntry]) {
        for entry in providers {
            if let ProviderBinding::Controller(controller) = &entry.binding {
                debug!(
                    controller = %entry.name,
                    owner = %entry.owner,
                    "Controller wired"
                );
                self.controllers
                    .insert(entry.name.clone(), Arc::clone(controller));
            }
        }
    }

    /// Looks up a controller by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Controller>> {
        self.controllers.get(name)
    }

    /// Number of wired controllers.
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Whether no controllers are wired.
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

/// Converts a route-table pattern (`/blog/:slug`) to Axum's path syntax
/// (`/blog/{slug}`).
pub fn axum_path(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Handles one request matched to a route entry.
///
/// Resolves the controller from the registry, builds the [`ActionRequest`],
/// invokes the named action, and serializes the response: through the view
/// collaborator when the action names a template, as a JSON envelope
/// otherwise.
pub async fn dispatch_entry(
    state: AppState,
    entry: RouteEntry,
    params: HashMap<String, String>,
    query: HashMap<String, String>,
    body: Bytes,
) -> Response {
    let Some(controller) = state.controllers.get(&entry.controller) else {
        error!(
            controller = %entry.controller,
            pattern = %entry.pattern,
            owner = %entry.owner,
            "Route names a controller that was never wired"
        );
        return ApiError(AppError::internal(format!(
            "controller '{}' is not wired",
            entry.controller
        )))
        .into_response();
    };

    let body_json = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    let request = ActionRequest {
        params,
        query,
        body: body_json,
    };

    match controller.invoke(&entry.action, request).await {
        Ok(response) => match response.template {
            Some(template) => match state.view.render(&template, &response.payload) {
                Ok(rendered) => Html(rendered).into_response(),
                Err(e) => ApiError(e).into_response(),
            },
            None => Json(ApiResponse::ok(response.payload)).into_response(),
        },
        Err(e) => ApiError(e).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axum_path_converts_params() {
        assert_eq!(axum_path("/blog/:slug"), "/blog/{slug}");
        assert_eq!(axum_path("/orders"), "/orders");
        assert_eq!(axum_path("/a/:b/c/:d"), "/a/{b}/c/{d}");
    }
}
