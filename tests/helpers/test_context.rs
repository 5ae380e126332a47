//! Engine fixtures
//!
//! A [`TestContext`] wires both bots to one in-memory store with recording
//! gateways, the way `main` wires them to Telegram.

use std::sync::Arc;
use chrono::NaiveDate;
use EventBot::config::ImageConfig;
use EventBot::database::{DocumentStore, InMemoryDocumentStore};
use EventBot::handlers::{ConversationEngine, IncomingMessage};
use EventBot::models::{Event, Participant, QuestionType, RsvpQuestion};
use EventBot::services::{ImageDelivery, NotificationService};
use EventBot::state::{OrganiserState, ParticipantState};
use EventBot::{DatabaseService, OrganiserBot, ParticipantBot};
use super::{init_test_logging, FakeImageHost, RecordingGateway};

pub const ORGANISER: i64 = 1001;
pub const OTHER_ORGANISER: i64 = 1002;
pub const PARTICIPANT_USERNAME: &str = "EventPartBot";

pub struct TestContext {
    pub db: DatabaseService,
    pub organiser_gateway: Arc<RecordingGateway>,
    pub participant_gateway: Arc<RecordingGateway>,
    pub images: Arc<FakeImageHost>,
    pub organiser: OrganiserBot,
    pub participant: ParticipantBot,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryDocumentStore::new()))
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_parts(store, ImageConfig { download_timeout_seconds: 1, ..ImageConfig::default() })
    }

    pub fn with_parts(store: Arc<dyn DocumentStore>, image_config: ImageConfig) -> Self {
        init_test_logging();

        let db = DatabaseService::new(store);
        let organiser_gateway = Arc::new(RecordingGateway::new());
        let participant_gateway = Arc::new(RecordingGateway::new());
        let images = Arc::new(FakeImageHost::new());

        let organiser = OrganiserBot::new(
            db.clone(),
            organiser_gateway.clone(),
            images.clone(),
            NotificationService::new(participant_gateway.clone(), 1000),
            PARTICIPANT_USERNAME,
        );
        let delivery = ImageDelivery::new(&image_config).expect("image delivery");
        let participant = ParticipantBot::new(db.clone(), participant_gateway.clone(), delivery);

        Self { db, organiser_gateway, participant_gateway, images, organiser, participant }
    }

    pub async fn organiser_says(&self, user_id: i64, text: &str) {
        self.organiser
            .handle_message(IncomingMessage::from_text(user_id, "Olivia", text))
            .await;
    }

    pub async fn organiser_sends_photo(&self, user_id: i64, file_id: &str) {
        self.organiser
            .handle_message(IncomingMessage::from_photo(user_id, "Olivia", file_id))
            .await;
    }

    pub async fn participant_says(&self, user_id: i64, name: &str, text: &str) {
        self.participant
            .handle_message(IncomingMessage::from_text(user_id, name, text))
            .await;
    }

    pub async fn organiser_state(&self, user_id: i64) -> OrganiserState {
        self.organiser.state_of(user_id).await
    }

    pub async fn participant_state(&self, user_id: i64) -> ParticipantState {
        self.participant.state_of(user_id).await
    }

    /// Store an event directly, bypassing the authoring conversation
    pub async fn seed_event(&self, owner: i64, name: &str, date: NaiveDate, questions: Vec<RsvpQuestion>) -> Event {
        let mut event = Event::draft(name, owner);
        event.event_date = date;
        event.rsvp_questions = questions;
        self.db.create_event(&mut event).await.expect("seed event");
        event
    }

    /// Register a participant without going through the join conversation
    pub async fn seed_participant(&self, event_id: &str, user_id: i64, name: &str) -> Participant {
        self.db
            .create_participant(event_id, Participant::new(user_id, name))
            .await
            .expect("seed participant")
            .participant
    }

    pub async fn reload_event(&self, event_id: &str) -> Event {
        self.db.read_event(event_id).await.expect("event exists")
    }

    pub async fn reload_participant(&self, user_id: i64) -> Participant {
        self.db
            .read_participant_by_user_id(user_id)
            .await
            .expect("read participant")
            .expect("participant exists")
    }
}

pub fn question(id: &str, text: &str, question_type: QuestionType, options: &[&str]) -> RsvpQuestion {
    let mut question = RsvpQuestion::new(id.to_string(), text.to_string());
    question.set_type(question_type);
    if question_type.needs_options() {
        question.options = options.iter().map(|o| o.to_string()).collect();
    }
    question
}

pub fn far_future() -> NaiveDate {
    NaiveDate::from_ymd_opt(2999, 1, 1).unwrap()
}
