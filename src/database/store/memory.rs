//! Process-local document store
//!
//! Keeps documents in memory for local runs and tests. Nothing survives a
//! restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use crate::utils::{errors::Result, helpers::generate_document_id};
use super::{with_id, DocumentFilter, DocumentStore};

struct StoredDocument {
    sequence: u64,
    data: Value,
}

#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, HashMap<String, StoredDocument>>>,
    sequence: AtomicU64,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, |documents| documents.len())
    }

    fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, collection: &str, document: Value) -> Result<String> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        let mut id = generate_document_id();
        while documents.contains_key(&id) {
            id = generate_document_id();
        }

        let stored = StoredDocument { sequence: self.next_sequence(), data: with_id(document, &id) };
        documents.insert(id.clone(), stored);
        debug!(collection = collection, id = %id, "Document created");
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .map(|stored| stored.data.clone()))
    }

    async fn set(&self, collection: &str, id: &str, document: Value) -> Result<()> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();
        let data = with_id(document, id);

        match documents.get_mut(id) {
            Some(stored) => stored.data = data,
            None => {
                let sequence = self.next_sequence();
                documents.insert(id.to_string(), StoredDocument { sequence, data });
            }
        }
        debug!(collection = collection, id = id, "Document stored");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let removed = collections
            .get_mut(collection)
            .and_then(|documents| documents.remove(id))
            .is_some();
        debug!(collection = collection, id = id, removed = removed, "Document delete");
        Ok(removed)
    }

    async fn query(&self, collection: &str, filter: &DocumentFilter) -> Result<Vec<Value>> {
        let collections = self.collections.read().await;
        let Some(documents) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut matching: Vec<&StoredDocument> = documents
            .values()
            .filter(|stored| filter.matches(&stored.data))
            .collect();
        matching.sort_by_key(|stored| stored.sequence);

        Ok(matching.into_iter().map(|stored| stored.data.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_assigns_id() {
        let store = InMemoryDocumentStore::new();
        let id = store.create("events", json!({"name": "Demo"})).await.unwrap();

        let doc = store.get("events", &id).await.unwrap().unwrap();
        assert_eq!(doc["id"], json!(id));
        assert_eq!(doc["name"], "Demo");
        assert!(store.get("participants", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_replaces_and_delete_reports() {
        let store = InMemoryDocumentStore::new();
        let id = store.create("events", json!({"name": "Old"})).await.unwrap();
        store.set("events", &id, json!({"name": "New"})).await.unwrap();

        let doc = store.get("events", &id).await.unwrap().unwrap();
        assert_eq!(doc["name"], "New");
        assert_eq!(doc["id"], json!(id));

        assert!(store.delete("events", &id).await.unwrap());
        assert!(!store.delete("events", &id).await.unwrap());
        assert_eq!(store.count("events").await, 0);
    }

    #[tokio::test]
    async fn test_query_keeps_creation_order() {
        let store = InMemoryDocumentStore::new();
        for name in ["a", "b", "c"] {
            store.create("events", json!({"name": name, "userid": 1})).await.unwrap();
        }
        store.create("events", json!({"name": "other", "userid": 2})).await.unwrap();

        let docs = store
            .query("events", &DocumentFilter::field_equals("userid", 1))
            .await
            .unwrap();
        let names: Vec<&str> = docs.iter().filter_map(|d| d["name"].as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
