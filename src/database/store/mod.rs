//! Document store abstraction
//!
//! Events and participants are kept as JSON documents grouped in named
//! collections. Document ids are assigned by the store on creation.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use crate::utils::errors::Result;

pub use memory::InMemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Collection holding one document per event
pub const EVENTS: &str = "events";

/// Collection holding one document per participant
pub const PARTICIPANTS: &str = "participants";

/// Field every stored document carries its own id in
pub const ID_FIELD: &str = "id";

/// Query predicate over the top-level fields of a document
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentFilter {
    /// `field` equals `value`
    FieldEquals { field: String, value: Value },
    /// `field` is an array with an element containing `element`
    ArrayContains { field: String, element: Value },
}

impl DocumentFilter {
    pub fn field_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        DocumentFilter::FieldEquals { field: field.into(), value: value.into() }
    }

    pub fn array_contains(field: impl Into<String>, element: impl Into<Value>) -> Self {
        DocumentFilter::ArrayContains { field: field.into(), element: element.into() }
    }

    /// Evaluate the filter against a document held in memory
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            DocumentFilter::FieldEquals { field, value } => document.get(field) == Some(value),
            DocumentFilter::ArrayContains { field, element } => match document.get(field) {
                Some(Value::Array(items)) => items.iter().any(|item| json_contains(item, element)),
                _ => false,
            },
        }
    }
}

/// JSON containment with the same meaning as Postgres `@>` on JSONB
pub fn json_contains(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::Object(h), Value::Object(n)) => n
            .iter()
            .all(|(key, value)| h.get(key).is_some_and(|hv| json_contains(hv, value))),
        (Value::Array(h), Value::Array(n)) => n
            .iter()
            .all(|value| h.iter().any(|hv| json_contains(hv, value))),
        (Value::Array(h), scalar) if !scalar.is_object() => h.iter().any(|hv| hv == scalar),
        (h, n) => h == n,
    }
}

/// Write `id` into the document's id field
pub(crate) fn with_id(mut document: Value, id: &str) -> Value {
    if let Value::Object(map) = &mut document {
        map.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    }
    document
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return the id assigned to it
    async fn create(&self, collection: &str, document: Value) -> Result<String>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Create or replace the document stored under `id`
    async fn set(&self, collection: &str, id: &str, document: Value) -> Result<()>;

    /// Returns false when nothing was stored under `id`
    async fn delete(&self, collection: &str, id: &str) -> Result<bool>;

    /// Matching documents in creation order
    async fn query(&self, collection: &str, filter: &DocumentFilter) -> Result<Vec<Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_equals() {
        let filter = DocumentFilter::field_equals("userid", 42);
        assert!(filter.matches(&json!({"userid": 42, "name": "x"})));
        assert!(!filter.matches(&json!({"userid": 43})));
        assert!(!filter.matches(&json!({"name": "x"})));
    }

    #[test]
    fn test_array_contains_object_subset() {
        let filter = DocumentFilter::array_contains("signedUpEvents", json!({"eventID": "e1"}));
        let doc = json!({
            "signedUpEvents": [
                {"eventID": "e0", "checkedIn": false},
                {"eventID": "e1", "checkedIn": true, "rsvpAnswers": []}
            ]
        });
        assert!(filter.matches(&doc));
        assert!(!filter.matches(&json!({"signedUpEvents": [{"eventID": "e2"}]})));
        assert!(!filter.matches(&json!({"signedUpEvents": "e1"})));
    }

    #[test]
    fn test_json_contains_nested() {
        assert!(json_contains(&json!({"a": [1, 2, 3]}), &json!({"a": [3, 1]})));
        assert!(!json_contains(&json!({"a": [1, 2]}), &json!({"a": [4]})));
        assert!(json_contains(&json!("x"), &json!("x")));
        assert!(!json_contains(&json!({"a": 1}), &json!({"b": 1})));
    }

    #[test]
    fn test_with_id() {
        let doc = with_id(json!({"name": "Demo", "id": ""}), "abc");
        assert_eq!(doc["id"], "abc");
        assert_eq!(doc["name"], "Demo");
    }
}
