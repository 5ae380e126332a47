//! Event repository implementation

use std::sync::Arc;
use serde_json::Value;
use crate::database::store::{DocumentFilter, DocumentStore, EVENTS};
use crate::models::Event;
use crate::utils::errors::{EventBotError, Result};

#[derive(Clone)]
pub struct EventRepository {
    store: Arc<dyn DocumentStore>,
}

impl EventRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a new event and return its reference code
    pub async fn create(&self, event: &Event) -> Result<String> {
        let document = serde_json::to_value(event)?;
        self.store.create(EVENTS, document).await
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Event>> {
        match self.store.get(EVENTS, id).await? {
            Some(document) => Ok(Some(Self::decode(document)?)),
            None => Ok(None),
        }
    }

    /// Read an event that must exist
    pub async fn get(&self, id: &str) -> Result<Event> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| EventBotError::EventNotFound { event_id: id.to_string() })
    }

    /// Replace the stored event with `event`
    pub async fn update(&self, event: &Event) -> Result<()> {
        if event.id.is_empty() {
            return Err(EventBotError::InvalidInput("event has no id".to_string()));
        }
        let document = serde_json::to_value(event)?;
        self.store.set(EVENTS, &event.id, document).await
    }

    /// Delete event
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.store.delete(EVENTS, id).await? {
            Ok(())
        } else {
            Err(EventBotError::EventNotFound { event_id: id.to_string() })
        }
    }

    /// Events created by an organiser, in creation order
    pub async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Event>> {
        let documents = self
            .store
            .query(EVENTS, &DocumentFilter::field_equals("userid", user_id))
            .await?;
        documents.into_iter().map(Self::decode).collect()
    }

    fn decode(document: Value) -> Result<Event> {
        Ok(serde_json::from_value(document)?)
    }
}
