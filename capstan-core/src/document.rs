//! Pipeline document
//!
//! Pipeline definitions travel as loosely-typed JSON objects so that the
//! backend's flexible schema passes through this component untouched. This
//! wrapper narrows the handful of fields the persistence task actually
//! reasons about (`id`, `application`, `name`, `index`, `triggers`, `roles`)
//! while leaving everything else opaque.

use serde_json::{Map, Value};

/// A pipeline definition as a string-keyed JSON object
///
/// Constructed fresh per task invocation from the workflow context, mutated
/// in place, submitted, and discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineDocument {
    fields: Map<String, Value>,
}

impl PipelineDocument {
    /// Wraps an existing JSON object
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Returns true if the document has the given field
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Gets a raw field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Sets a raw field value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    /// The document identifier, if the backend has assigned one
    pub fn id(&self) -> Option<&str> {
        self.fields.get("id").and_then(Value::as_str)
    }

    /// The owning application name
    pub fn application(&self) -> Option<&str> {
        self.fields.get("application").and_then(Value::as_str)
    }

    /// The pipeline name
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// The ordering hint, kept as a raw value so it round-trips exactly
    pub fn index(&self) -> Option<&Value> {
        self.fields.get("index")
    }

    /// Copies an ordering hint onto this document
    ///
    /// `index` is append-only ordering state owned by the backend; callers
    /// only set it here when carrying it forward from a persisted version.
    pub fn set_index(&mut self, index: Value) {
        self.fields.insert("index".to_string(), index);
    }

    /// The embedded trigger records, if any
    pub fn triggers_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.fields.get_mut("triggers").and_then(Value::as_array_mut)
    }

    /// Returns true if the document carries a non-empty `roles` list
    pub fn has_roles(&self) -> bool {
        self.fields
            .get("roles")
            .and_then(Value::as_array)
            .is_some_and(|roles| !roles.is_empty())
    }

    /// Borrows the underlying JSON object, e.g. for submission
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the document, returning the underlying JSON object
    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for PipelineDocument {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
