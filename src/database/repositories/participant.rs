//! Participant repository implementation

use std::sync::Arc;
use serde_json::{json, Value};
use crate::database::store::{DocumentFilter, DocumentStore, PARTICIPANTS};
use crate::models::Participant;
use crate::utils::errors::{EventBotError, Result};

#[derive(Clone)]
pub struct ParticipantRepository {
    store: Arc<dyn DocumentStore>,
}

impl ParticipantRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a new participant and return its id
    pub async fn create(&self, participant: &Participant) -> Result<String> {
        let document = serde_json::to_value(participant)?;
        self.store.create(PARTICIPANTS, document).await
    }

    /// Find participant by Telegram user id
    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Participant>> {
        let documents = self
            .store
            .query(PARTICIPANTS, &DocumentFilter::field_equals("userid", user_id))
            .await?;

        match documents.into_iter().next() {
            Some(document) => Ok(Some(Self::decode(document)?)),
            None => Ok(None),
        }
    }

    /// Replace the stored participant with `participant`
    pub async fn update(&self, participant: &Participant) -> Result<()> {
        if participant.id.is_empty() {
            return Err(EventBotError::InvalidInput("participant has no id".to_string()));
        }
        let document = serde_json::to_value(participant)?;
        self.store.set(PARTICIPANTS, &participant.id, document).await
    }

    /// Participants with a registration for `event_id`, in creation order
    pub async fn list_by_event(&self, event_id: &str) -> Result<Vec<Participant>> {
        let filter = DocumentFilter::array_contains("signedUpEvents", json!({ "eventID": event_id }));
        let documents = self.store.query(PARTICIPANTS, &filter).await?;
        documents.into_iter().map(Self::decode).collect()
    }

    fn decode(document: Value) -> Result<Participant> {
        Ok(serde_json::from_value(document)?)
    }
}
