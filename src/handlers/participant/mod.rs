//! Participant bot conversation engine

mod attendance;
mod join;
mod listing;

use async_trait::async_trait;
use std::sync::Arc;
use teloxide::utils::command::BotCommands;
use tracing::error;
use crate::database::DatabaseService;
use crate::handlers::commands::{argument, help, ParticipantCommand};
use crate::handlers::messages::IncomingMessage;
use crate::handlers::reply::Outbox;
use crate::handlers::ConversationEngine;
use crate::services::gateway::{Markup, MessagingGateway};
use crate::services::image::ImageDelivery;
use crate::state::{ParticipantState, SessionStore};
use crate::utils::errors::{EventBotError, Result};
use crate::utils::helpers::parse_join_payload;
use crate::utils::logging::{log_transition, log_user_action};

const BOT: &str = "participant";

pub struct ParticipantBot {
    db: DatabaseService,
    outbox: Outbox,
    images: ImageDelivery,
    sessions: SessionStore<ParticipantState>,
    bot_name: String,
}

impl ParticipantBot {
    pub fn new(db: DatabaseService, gateway: Arc<dyn MessagingGateway>, images: ImageDelivery) -> Self {
        Self {
            db,
            outbox: Outbox::new(gateway),
            images,
            sessions: SessionStore::new(),
            bot_name: String::new(),
        }
    }

    pub fn with_bot_name(mut self, bot_name: impl Into<String>) -> Self {
        self.bot_name = bot_name.into();
        self
    }

    pub async fn state_of(&self, user_id: i64) -> ParticipantState {
        self.sessions.acquire(user_id).await.clone()
    }

    async fn transition(&self, state: ParticipantState, msg: &IncomingMessage) -> Result<ParticipantState> {
        match state {
            ParticipantState::Idle => self.handle_idle(msg).await,
            ParticipantState::JoinEvent => self.join_event(msg, msg.input()).await,
            ParticipantState::PersonalNotes { event_id: None } => self.select_notes_event(msg, msg.input()).await,
            ParticipantState::PersonalNotes { event_id: Some(event_id) } => self.edit_notes(msg, event_id).await,
            ParticipantState::CheckIn => self.start_check_in(msg, msg.input()).await,
            ParticipantState::EnteringCheckInCode { event_id } => self.enter_check_in_code(msg, &event_id).await,
            ParticipantState::SelectEventForRsvp { pending } => self.select_rsvp_event(msg, pending).await,
            ParticipantState::AnsweringRsvpQuestion { event, index } => {
                self.answer_rsvp_question(msg, event, index).await
            }
        }
    }

    async fn handle_idle(&self, msg: &IncomingMessage) -> Result<ParticipantState> {
        let command = match ParticipantCommand::parse(msg.input(), &self.bot_name) {
            Ok(command) => command,
            Err(_) => {
                self.reply(msg, help::UNKNOWN_COMMAND).await;
                return Ok(ParticipantState::Idle);
            }
        };
        log_user_action(BOT, msg.user_id, "command", Some(msg.input()));

        match command {
            ParticipantCommand::Start(payload) => match parse_join_payload(payload.trim()) {
                Some(event_id) => self.join_event(msg, event_id).await,
                None => {
                    self.reply(msg, &help::participant_start_text(&msg.first_name)).await;
                    Ok(ParticipantState::Idle)
                }
            },
            ParticipantCommand::Help => {
                self.reply(msg, help::participant_help_text()).await;
                Ok(ParticipantState::Idle)
            }
            ParticipantCommand::ViewEvents => self.list_events(msg, true).await,
            ParticipantCommand::PastEvents => self.list_events(msg, false).await,
            ParticipantCommand::JoinEvent(code) => match argument(&code) {
                Some(code) => self.join_event(msg, code).await,
                None => {
                    self.reply(msg, "Please enter the Reference Code of the event you want to join.").await;
                    Ok(ParticipantState::JoinEvent)
                }
            },
            ParticipantCommand::Notes(code) => match argument(&code) {
                Some(code) => self.select_notes_event(msg, code).await,
                None => {
                    self.reply(msg, "Please enter the Reference Code of the event whose notes you want to see.").await;
                    Ok(ParticipantState::PersonalNotes { event_id: None })
                }
            },
            ParticipantCommand::CheckIn(code) => match argument(&code) {
                Some(code) => self.start_check_in(msg, code).await,
                None => {
                    self.reply(msg, "Please enter the Reference Code of the event you want to check in to.").await;
                    Ok(ParticipantState::CheckIn)
                }
            },
        }
    }

    async fn reply(&self, msg: &IncomingMessage, text: &str) {
        self.outbox.text(msg.chat_id, text, Markup::None).await;
    }

    async fn report_error(&self, msg: &IncomingMessage, err: &EventBotError) {
        let text = match err {
            EventBotError::EventNotFound { event_id } => format!(
                "No event found with Reference Code '{}'. Please check the code and try again.",
                event_id
            ),
            EventBotError::NotRegistered { event_id } => format!(
                "You are not registered for event '{}'. Use /joinEvent to join it first.",
                event_id
            ),
            EventBotError::ParticipantDoesNotExist { .. } => "You are not signed up for any events.".to_string(),
            _ => {
                error!(user_id = msg.user_id, error = %err, severity = %err.severity(), "Participant conversation failed");
                "Something went wrong. Please try again.".to_string()
            }
        };
        self.outbox.text(msg.chat_id, &text, Markup::RemoveKeyboard).await;
    }
}

#[async_trait]
impl ConversationEngine for ParticipantBot {
    async fn handle_message(&self, msg: IncomingMessage) {
        let mut session = self.sessions.acquire(msg.user_id).await;
        let from = session.name();
        let state = std::mem::take(&mut *session);

        let next = match self.transition(state, &msg).await {
            Ok(next) => next,
            Err(e) => {
                self.report_error(&msg, &e).await;
                ParticipantState::Idle
            }
        };

        log_transition(BOT, msg.user_id, from, next.name());
        *session = next;
    }
}
