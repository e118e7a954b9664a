//! Minimal request/response value objects for controller dispatch.
//!
//! Full HTTP semantics stay in the HTTP layer; the core only needs path
//! parameters, query parameters, an optional JSON body, and a payload
//! mapping with an optional template name on the way out.

use std::collections::HashMap;

use serde_json::Value;

use super::component::Payload;

/// The request data a resolved controller action receives.
#[derive(Debug, Clone, Default)]
pub struct ActionRequest {
    /// Path parameters extracted from the matched route pattern.
    pub params: HashMap<String, String>,
    /// Query string parameters.
    pub query: HashMap<String, String>,
    /// Parsed JSON body, if any.
    pub body: Option<Value>,
}

impl ActionRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a path parameter (test/builder convenience).
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set a query parameter (test/builder convenience).
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Get a path parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Get a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

/// What a controller action hands back to the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct ActionResponse {
    /// Template name for the view collaborator; `None` means raw payload.
    pub template: Option<String>,
    /// The payload mapping for the view layer.
    pub payload: Payload,
}

impl ActionResponse {
    /// A payload-only response.
    pub fn with_payload(payload: Payload) -> Self {
        Self {
            template: None,
            payload,
        }
    }

    /// A response rendered through the view collaborator.
    pub fn rendered(template: impl Into<String>, payload: Payload) -> Self {
        Self {
            template: Some(template.into()),
            payload,
        }
    }
}
