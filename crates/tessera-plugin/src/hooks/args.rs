//! Trigger-call context passed to every transform in a chain.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extra arguments for one trigger call, as a flexible key-value map.
///
/// Args are shared read-only by every subscriber of the chain; they are
/// never folded into the accumulator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HookArgs {
    /// Arbitrary data keyed by string.
    pub data: HashMap<String, Value>,
}

impl HookArgs {
    /// Creates empty args.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a typed value.
    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    /// Inserts a string value.
    pub fn with_str(self, key: &str, value: &str) -> Self {
        self.with_value(key, Value::String(value.to_string()))
    }

    /// Inserts an integer value.
    pub fn with_int(self, key: &str, value: i64) -> Self {
        self.with_value(key, serde_json::json!(value))
    }

    /// Gets a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Gets a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// Gets an i64 value.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.data.get(key).and_then(|v| v.as_i64())
    }

    /// Whether no args are present.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
