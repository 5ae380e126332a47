//! Database service layer
//!
//! This module provides the repository operations both bots rely on,
//! including keeping the event/participant back-references in step.

use std::sync::Arc;
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use crate::database::store::DocumentStore;
use crate::database::{EventRepository, ParticipantRepository};
use crate::models::{Event, Participant};
use crate::utils::errors::{EventBotError, Result};

/// Result of registering a user for an event
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub event: Event,
    pub participant: Participant,
    /// False when the user was already registered for the event
    pub newly_joined: bool,
}

#[derive(Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub participants: ParticipantRepository,
    /// Held by partial event updates that read the event and write it back
    event_writes: Arc<Mutex<()>>,
}

impl DatabaseService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            events: EventRepository::new(store.clone()),
            participants: ParticipantRepository::new(store),
            event_writes: Arc::new(Mutex::new(())),
        }
    }

    /// Persist a new event, writing the assigned reference code back into it
    pub async fn create_event(&self, event: &mut Event) -> Result<String> {
        let id = self.events.create(event).await?;
        event.id = id.clone();
        debug!(event_id = %id, owner = event.user_id, "Event created");
        Ok(id)
    }

    pub async fn read_event(&self, event_id: &str) -> Result<Event> {
        self.events.get(event_id).await
    }

    pub async fn update_event(&self, event: &Event) -> Result<()> {
        self.events.update(event).await
    }

    /// Set the check-in code on the stored event, keeping every other field
    pub async fn set_check_in_code(&self, event_id: &str, code: &str) -> Result<Event> {
        let _guard = self.event_writes.lock().await;
        let mut event = self.events.get(event_id).await?;
        event.check_in_code = Some(code.to_string());
        self.events.update(&event).await?;
        Ok(event)
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        self.events.delete(event_id).await
    }

    pub async fn list_events_by_owner(&self, user_id: i64) -> Result<Vec<Event>> {
        self.events.list_by_owner(user_id).await
    }

    /// Register `participant` for an event.
    ///
    /// The Telegram user id is the natural key: an existing participant gets
    /// the event appended (once), otherwise `participant` is created. The
    /// event's participant list is updated without duplicates.
    pub async fn create_participant(&self, event_id: &str, participant: Participant) -> Result<JoinOutcome> {
        let _guard = self.event_writes.lock().await;
        let mut event = self.events.get(event_id).await?;

        let (participant, newly_joined) = match self.participants.find_by_user_id(participant.user_id).await? {
            Some(mut existing) => {
                let added = existing.sign_up(event_id);
                if added {
                    self.participants.update(&existing).await?;
                }
                (existing, added)
            }
            None => {
                let mut created = participant;
                created.sign_up(event_id);
                created.id = self.participants.create(&created).await?;
                (created, true)
            }
        };

        if event.add_participant(&participant.id) {
            self.events.update(&event).await?;
        }

        debug!(
            event_id = event_id,
            participant_id = %participant.id,
            newly_joined = newly_joined,
            "Participant registered"
        );
        Ok(JoinOutcome { event, participant, newly_joined })
    }

    pub async fn read_participant_by_user_id(&self, user_id: i64) -> Result<Option<Participant>> {
        self.participants.find_by_user_id(user_id).await
    }

    pub async fn update_participant(&self, participant: &Participant) -> Result<()> {
        self.participants.update(participant).await
    }

    pub async fn list_participants_of_event(&self, event_id: &str) -> Result<Vec<Participant>> {
        self.participants.list_by_event(event_id).await
    }

    /// Events a user signed up for.
    ///
    /// Fails with `ParticipantDoesNotExist` if the user never joined
    /// anything. Events deleted since signing up are skipped.
    pub async fn list_events_by_participant_user_id(&self, user_id: i64) -> Result<Vec<Event>> {
        let participant = self
            .participants
            .find_by_user_id(user_id)
            .await?
            .ok_or(EventBotError::ParticipantDoesNotExist { user_id })?;

        let reads = participant
            .signed_up_events
            .iter()
            .map(|signup| self.events.find_by_id(&signup.event_id));

        let mut events = Vec::with_capacity(participant.signed_up_events.len());
        for (signup, result) in participant.signed_up_events.iter().zip(join_all(reads).await) {
            match result? {
                Some(event) => events.push(event),
                None => warn!(
                    user_id = user_id,
                    event_id = %signup.event_id,
                    "Signed-up event no longer exists"
                ),
            }
        }

        Ok(events)
    }
}
