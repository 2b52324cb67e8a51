//! Workflow context
//!
//! The mutable, string-keyed view of an execution's state that the host
//! workflow engine hands to a task on each invocation. Values are arbitrary
//! JSON; tasks narrow them to the types they need at the point of use.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Map, Value};

use crate::task::TaskError;

/// Per-execution workflow context
///
/// Wraps the engine-owned key/value map for one task invocation. The engine
/// merges a task's outputs back into this map after the task returns, so
/// keys written by upstream stages are visible here.
#[derive(Debug, Clone, Default)]
pub struct WorkflowContext {
    values: Map<String, Value>,
}

impl WorkflowContext {
    /// Creates a context from an existing value map
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Returns true if the context contains the given key
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Gets a raw value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Gets a string value by key
    ///
    /// Returns `None` if the key is absent or holds a non-string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    /// Gets a boolean value by key, falling back to a default
    ///
    /// Absent keys and non-boolean values both yield the default.
    pub fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.values
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(default)
    }

    /// Inserts a value, returning the previous one if any
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(key.into(), value)
    }

    /// Decodes a base64-encoded JSON object stored under the given key
    ///
    /// Upstream stages may place large documents in the context as
    /// base64-encoded JSON strings rather than inline objects. This decodes
    /// the string at `key` and parses it as a JSON object.
    pub fn decode_base64_map(&self, key: &str) -> Result<Map<String, Value>, TaskError> {
        let encoded = self
            .get_str(key)
            .ok_or_else(|| TaskError::MissingContext(key.to_string()))?;

        let bytes = BASE64.decode(encoded).map_err(|e| TaskError::InvalidContext {
            key: key.to_string(),
            reason: format!("invalid base64: {e}"),
        })?;

        serde_json::from_slice(&bytes).map_err(|e| TaskError::InvalidContext {
            key: key.to_string(),
            reason: format!("decoded payload is not a JSON object: {e}"),
        })
    }

    /// Consumes the context, returning the underlying map
    pub fn into_values(self) -> Map<String, Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context_with(key: &str, value: Value) -> WorkflowContext {
        let mut values = Map::new();
        values.insert(key.to_string(), value);
        WorkflowContext::new(values)
    }

    #[test]
    fn test_get_bool_or_defaults_when_absent() {
        let ctx = WorkflowContext::default();
        assert!(!ctx.get_bool_or("staleCheck", false));
        assert!(ctx.get_bool_or("staleCheck", true));
    }

    #[test]
    fn test_get_bool_or_reads_present_value() {
        let ctx = context_with("isSavingMultiplePipelines", json!(true));
        assert!(ctx.get_bool_or("isSavingMultiplePipelines", false));
    }

    #[test]
    fn test_get_str_rejects_non_strings() {
        let ctx = context_with("pipeline.id", json!(42));
        assert_eq!(ctx.get_str("pipeline.id"), None);
    }

    #[test]
    fn test_decode_base64_map() {
        // {"application":"app1","name":"p1"} encoded
        let encoded = "eyJhcHBsaWNhdGlvbiI6ImFwcDEiLCJuYW1lIjoicDEifQ==";
        let ctx = context_with("pipeline", json!(encoded));

        let decoded = ctx.decode_base64_map("pipeline").unwrap();
        assert_eq!(decoded.get("application"), Some(&json!("app1")));
        assert_eq!(decoded.get("name"), Some(&json!("p1")));
    }

    #[test]
    fn test_decode_base64_map_rejects_garbage() {
        let ctx = context_with("pipeline", json!("not base64!!!"));
        let err = ctx.decode_base64_map("pipeline").unwrap_err();
        assert!(matches!(err, TaskError::InvalidContext { .. }));
    }

    #[test]
    fn test_decode_base64_map_missing_key() {
        let ctx = WorkflowContext::default();
        let err = ctx.decode_base64_map("pipeline").unwrap_err();
        assert!(matches!(err, TaskError::MissingContext(_)));
    }
}
