//! Component value types: metadata, cache policy, options, payloads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

/// The payload mapping a component produces for the view layer.
pub type Payload = serde_json::Map<String, Value>;

/// Static cache strategy declared in a component's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// The component derives a cache key per invocation.
    Keyed,
    /// The component's output must never be served from cache.
    Never,
}

/// Per-invocation cache decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheKey {
    /// Look up / store under this key.
    Key(String),
    /// Always recompute; no cache lookup or store.
    Never,
}

/// Static component metadata, queried before instantiation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentMeta {
    /// Component name; also the scope of its `results` extension point.
    pub name: String,
    /// Option names this component recognizes.
    pub valid_options: Vec<String>,
    /// Cache strategy.
    pub cache: CachePolicy,
}

impl ComponentMeta {
    /// Create metadata for a component.
    pub fn new(
        name: impl Into<String>,
        valid_options: &[&str],
        cache: CachePolicy,
    ) -> Self {
        Self {
            name: name.into(),
            valid_options: valid_options.iter().map(|s| s.to_string()).collect(),
            cache,
        }
    }
}

/// Recognized options for one component invocation.
///
/// Construction filters the raw option map against the component's declared
/// option names; unknown keys are dropped, not an error, so component
/// authors stay forward-compatible with schema evolution.
#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
    values: HashMap<String, Value>,
}

impl ComponentOptions {
    /// Build options from a raw map, keeping only recognized keys.
    pub fn filtered(valid: &[String], raw: &serde_json::Map<String, Value>) -> Self {
        let mut values = HashMap::new();
        for (key, value) in raw {
            if valid.iter().any(|v| v == key) {
                values.insert(key.clone(), value.clone());
            } else {
                trace!(option = %key, "Dropping unrecognized component option");
            }
        }
        Self { values }
    }

    /// Get a raw option value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a string option.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    /// Get an unsigned integer option.
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.values.get(key).and_then(|v| v.as_u64())
    }

    /// Number of recognized options present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no recognized options are present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over the recognized option values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_options_are_dropped() {
        let valid = vec!["limit".to_string(), "heading".to_string()];
        let mut raw = serde_json::Map::new();
        raw.insert("limit".to_string(), json!(5));
        raw.insert("heading".to_string(), json!("Latest"));
        raw.insert("unknown".to_string(), json!(true));

        let options = ComponentOptions::filtered(&valid, &raw);

        assert_eq!(options.len(), 2);
        assert_eq!(options.get_u64("limit"), Some(5));
        assert_eq!(options.get_str("heading"), Some("Latest"));
        assert!(options.get("unknown").is_none());
    }
}
