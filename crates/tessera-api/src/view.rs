//! Default view collaborator.
//!
//! Tessera ships no template engine; the JSON view serializes the payload
//! for templated responses so the dispatch path stays uniform. Hosts with a
//! real templating stack swap in their own [`ViewRenderer`].

use tessera_core::result::AppResult;
use tessera_core::traits::view::ViewRenderer;
use tessera_core::types::component::Payload;

/// View renderer that emits the payload as pretty JSON, tagged with the
/// template name.
#[derive(Debug, Default)]
pub struct JsonView;

impl JsonView {
    /// Creates the JSON view.
    pub fn new() -> Self {
        Self
    }
}

impl ViewRenderer for JsonView {
    fn render(&self, template: &str, payload: &Payload) -> AppResult<String> {
        let mut document = serde_json::Map::new();
        document.insert(
            "template".to_string(),
            serde_json::Value::String(template.to_string()),
        );
        document.insert(
            "payload".to_string(),
            serde_json::Value::Object(payload.clone()),
        );
        Ok(serde_json::to_string_pretty(&document)?)
    }
}
