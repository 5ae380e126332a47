//! Organiser bot conversation engine
//!
//! Drives event authoring and event management for organisers. Every
//! incoming message is handled while holding the sender's session lock.

mod authoring;
mod management;

use std::sync::Arc;
use async_trait::async_trait;
use teloxide::utils::command::BotCommands;
use tracing::{error, info};
use crate::database::DatabaseService;
use crate::handlers::commands::{argument, help, OrganiserCommand};
use crate::handlers::keyboards;
use crate::handlers::messages::IncomingMessage;
use crate::handlers::reply::Outbox;
use crate::handlers::ConversationEngine;
use crate::services::gateway::{Markup, MessagingGateway};
use crate::services::image::ImageHosting;
use crate::services::notification::NotificationService;
use crate::state::{OrganiserState, SessionStore};
use crate::utils::errors::{EventBotError, Result};
use crate::utils::logging::{log_transition, log_user_action};

const BOT: &str = "organiser";

pub struct OrganiserBot {
    db: DatabaseService,
    outbox: Outbox,
    images: Arc<dyn ImageHosting>,
    notifications: NotificationService,
    sessions: SessionStore<OrganiserState>,
    participant_username: String,
    bot_name: String,
}

impl OrganiserBot {
    /// `notifications` must send through the participant bot, since
    /// participants never talk to the organiser bot.
    pub fn new(
        db: DatabaseService,
        gateway: Arc<dyn MessagingGateway>,
        images: Arc<dyn ImageHosting>,
        notifications: NotificationService,
        participant_username: impl Into<String>,
    ) -> Self {
        Self {
            db,
            outbox: Outbox::new(gateway),
            images,
            notifications,
            sessions: SessionStore::new(),
            participant_username: participant_username.into(),
            bot_name: String::new(),
        }
    }

    /// Username commands may be addressed to, as in `/help@name`
    pub fn with_bot_name(mut self, bot_name: impl Into<String>) -> Self {
        self.bot_name = bot_name.into();
        self
    }

    /// Copy of a user's current state
    pub async fn state_of(&self, user_id: i64) -> OrganiserState {
        self.sessions.acquire(user_id).await.clone()
    }

    async fn transition(&self, state: OrganiserState, msg: &IncomingMessage) -> Result<OrganiserState> {
        if state.is_authoring() && msg.input() == keyboards::CANCEL {
            log_user_action(BOT, msg.user_id, "cancel_event_creation", Some(state.name()));
            self.outbox
                .text(msg.chat_id, "Event creation cancelled.", Markup::RemoveKeyboard)
                .await;
            return Ok(OrganiserState::Idle);
        }

        match state {
            OrganiserState::Idle => self.handle_idle(msg).await,
            OrganiserState::AddingEventName => self.add_event_name(msg).await,
            OrganiserState::AddingEventDate { event } => self.add_event_date(msg, event).await,
            OrganiserState::AddingEventPicture { event } => self.add_event_picture(msg, event).await,
            OrganiserState::AddingEventDetails { event } => self.add_event_detail_question(msg, event).await,
            OrganiserState::AddingEventDetailsImage { event, question } => {
                self.choose_detail_image(msg, event, question).await
            }
            OrganiserState::AddingEventDetailsImageUpload { event, question } => {
                self.upload_detail_image(msg, event, question).await
            }
            OrganiserState::AddingEventDetailsAnswer { event, pending } => {
                self.add_event_detail_answer(msg, event, pending).await
            }
            OrganiserState::AddingRsvpQuestion { event } => self.add_rsvp_question(msg, event).await,
            OrganiserState::SelectingRsvpType { event, question } => {
                self.select_rsvp_type(msg, event, question).await
            }
            OrganiserState::AddingRsvpOptions { event, question, options } => {
                self.add_rsvp_option(msg, event, question, options).await
            }
            OrganiserState::AddingRsvpImage { event, question } => {
                self.choose_rsvp_image(msg, event, question).await
            }
            OrganiserState::ConfirmRsvpQuestion { event, question } => {
                self.confirm_rsvp_question(msg, event, question).await
            }
            OrganiserState::DeleteEvent => self.delete_event(msg, msg.input()).await,
            OrganiserState::ListParticipants => self.list_participants(msg, msg.input()).await,
            OrganiserState::BlastMessage { event: None } => self.select_blast_event(msg, msg.input()).await,
            OrganiserState::BlastMessage { event: Some(event) } => self.send_blast(msg, event).await,
            OrganiserState::SettingEventCheckInCode => self.show_check_in_code(msg, msg.input()).await,
            OrganiserState::UpdatingEventCheckInCode { event_id } => self.update_check_in_code(msg, event_id).await,
        }
    }

    async fn handle_idle(&self, msg: &IncomingMessage) -> Result<OrganiserState> {
        let command = match OrganiserCommand::parse(msg.input(), &self.bot_name) {
            Ok(command) => command,
            Err(_) => {
                self.reply(msg, help::UNKNOWN_COMMAND).await;
                return Ok(OrganiserState::Idle);
            }
        };
        log_user_action(BOT, msg.user_id, "command", Some(msg.input()));

        match command {
            OrganiserCommand::Start => {
                self.reply(msg, help::organiser_start_text()).await;
                Ok(OrganiserState::Idle)
            }
            OrganiserCommand::Help => {
                self.reply(msg, help::organiser_help_text()).await;
                Ok(OrganiserState::Idle)
            }
            OrganiserCommand::AddEvent => {
                self.outbox
                    .text(
                        msg.chat_id,
                        "Okay, let's create a new event. What's the name of the event?",
                        keyboards::cancel(),
                    )
                    .await;
                Ok(OrganiserState::AddingEventName)
            }
            OrganiserCommand::DeleteEvent(code) => match argument(&code) {
                Some(code) => self.delete_event(msg, code).await,
                None => {
                    self.reply(msg, "Okay, let's delete an event. Please provide the Reference Code of the event you want to delete.").await;
                    Ok(OrganiserState::DeleteEvent)
                }
            },
            OrganiserCommand::ListParticipants(code) => match argument(&code) {
                Some(code) => self.list_participants(msg, code).await,
                None => {
                    self.reply(msg, "Okay, let's list the participants of an event. Please provide the Reference Code of the event.").await;
                    Ok(OrganiserState::ListParticipants)
                }
            },
            OrganiserCommand::Blast(code) => match argument(&code) {
                Some(code) => self.select_blast_event(msg, code).await,
                None => {
                    self.reply(msg, "Okay, let's send a message to all participants. Please provide the Reference Code of the event.").await;
                    Ok(OrganiserState::BlastMessage { event: None })
                }
            },
            OrganiserCommand::SetCheckInCode(code) => match argument(&code) {
                Some(code) => self.show_check_in_code(msg, code).await,
                None => {
                    self.reply(msg, "Okay, let's set the check-in code of an event. Please provide the Reference Code of the event.").await;
                    Ok(OrganiserState::SettingEventCheckInCode)
                }
            },
            OrganiserCommand::ViewEvents => {
                self.view_events(msg).await;
                Ok(OrganiserState::Idle)
            }
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
            EventBotError::PermissionDenied(_) => {
                "You can only manage events that you created.".to_string()
            }
            _ => {
                error!(user_id = msg.user_id, error = %err, severity = %err.severity(), "Organiser conversation failed");
                "Something went wrong. Please try again.".to_string()
            }
        };
        if err.is_user_facing() {
            info!(user_id = msg.user_id, error = %err, "Organiser request rejected");
        }
        self.outbox.text(msg.chat_id, &text, Markup::RemoveKeyboard).await;
    }

    /// Reject events owned by somebody else
    fn ensure_owner(&self, msg: &IncomingMessage, event: &crate::models::Event) -> Result<()> {
        if event.is_owned_by(msg.user_id) {
            Ok(())
        } else {
            Err(EventBotError::PermissionDenied(format!(
                "user {} does not own event {}",
                msg.user_id, event.id
            )))
        }
    }
}

#[async_trait]
impl ConversationEngine for OrganiserBot {
    async fn handle_message(&self, msg: IncomingMessage) {
        let mut session = self.sessions.acquire(msg.user_id).await;
        let from = session.name();
        let state = std::mem::take(&mut *session);

        let next = match self.transition(state, &msg).await {
            Ok(next) => next,
            Err(e) => {
                self.report_error(&msg, &e).await;
                OrganiserState::Idle
            }
        };

        log_transition(BOT, msg.user_id, from, next.name());
        *session = next;
    }
}
