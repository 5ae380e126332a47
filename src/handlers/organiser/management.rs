//! Managing saved events: delete, participant list, blast, check-in code

use tracing::{error, warn};
use crate::handlers::messages::IncomingMessage;
use crate::handlers::render;
use crate::models::Event;
use crate::services::gateway::Markup;
use crate::state::OrganiserState;
use crate::utils::errors::Result;
use crate::utils::helpers::is_valid_check_in_code;
use crate::utils::logging::log_event_action;
use super::OrganiserBot;

impl OrganiserBot {
    pub(super) async fn delete_event(&self, msg: &IncomingMessage, code: &str) -> Result<OrganiserState> {
        let failure = format!(
            "Error deleting event with ID '{}'. Please check the ID and try again.",
            code
        );

        let event = match self.db.read_event(code).await {
            Ok(event) => event,
            Err(e) => {
                if !e.is_not_found() {
                    warn!(event_id = code, error = %e, "Failed to read event for deletion");
                }
                self.reply(msg, &failure).await;
                return Ok(OrganiserState::Idle);
            }
        };
        self.ensure_owner(msg, &event)?;

        match self.db.delete_event(code).await {
            Ok(()) => {
                log_event_action(code, "deleted", msg.user_id, Some(&event.name));
                self.reply(
                    msg,
                    &format!("Event '{}' with ID '{}' has been deleted successfully.", event.name, code),
                )
                .await;
            }
            Err(e) => {
                warn!(event_id = code, error = %e, "Failed to delete event");
                self.reply(msg, &failure).await;
            }
        }
        Ok(OrganiserState::Idle)
    }

    pub(super) async fn list_participants(&self, msg: &IncomingMessage, code: &str) -> Result<OrganiserState> {
        let event = match self.db.read_event(code).await {
            Ok(event) => event,
            Err(e) if e.is_not_found() => {
                self.reply(msg, &format!("No event found with Reference Code '{}'.", code)).await;
                return Ok(OrganiserState::Idle);
            }
            Err(e) => return Err(e),
        };
        self.ensure_owner(msg, &event)?;

        let mut participants = self.db.list_participants_of_event(&event.id).await?;
        if participants.is_empty() {
            self.reply(msg, &format!("No participants found for event '{}'.", event.name)).await;
            return Ok(OrganiserState::Idle);
        }

        participants.sort_by(|a, b| a.name.cmp(&b.name));
        self.reply(msg, &render::participant_list(&event, &participants)).await;
        Ok(OrganiserState::Idle)
    }

    /// First blast turn: resolve the event and ask for the message
    pub(super) async fn select_blast_event(&self, msg: &IncomingMessage, code: &str) -> Result<OrganiserState> {
        let event = match self.db.read_event(code).await {
            Ok(event) => event,
            Err(e) => {
                if !e.is_not_found() {
                    warn!(event_id = code, error = %e, "Failed to read event for blast");
                }
                self.reply(msg, "Error retrieving event. Please try again.").await;
                return Ok(OrganiserState::Idle);
            }
        };
        self.ensure_owner(msg, &event)?;

        self.reply(
            msg,
            &format!(
                "Please key in the message you want to send to all participants of '{}'.",
                event.name
            ),
        )
        .await;
        Ok(OrganiserState::BlastMessage { event: Some(event) })
    }

    /// Second blast turn: deliver the message to every participant
    pub(super) async fn send_blast(&self, msg: &IncomingMessage, event: Event) -> Result<OrganiserState> {
        let body = msg.input();
        if body.is_empty() {
            self.reply(msg, "Please send the message as text.").await;
            return Ok(OrganiserState::BlastMessage { event: Some(event) });
        }

        let mut participants = self.db.list_participants_of_event(&event.id).await?;
        if participants.is_empty() {
            self.reply(msg, &format!("No participants found for event '{}'.", event.name)).await;
            return Ok(OrganiserState::Idle);
        }

        participants.sort_by(|a, b| a.name.cmp(&b.name));
        let chat_ids: Vec<i64> = participants.iter().map(|p| p.user_id).collect();
        let report = self
            .notifications
            .send_bulk(&chat_ids, &render::blast_message(body, &event))
            .await;
        log_event_action(
            &event.id,
            "blast",
            msg.user_id,
            Some(&format!("sent={} failed={}", report.sent, report.failed)),
        );

        let mut summary = format!("Message sent to {} participant(s).", report.sent);
        if report.failed > 0 {
            summary.push_str(&format!(" {} message(s) could not be delivered.", report.failed));
        }
        self.reply(msg, &summary).await;
        Ok(OrganiserState::Idle)
    }

    pub(super) async fn show_check_in_code(&self, msg: &IncomingMessage, code: &str) -> Result<OrganiserState> {
        let event = self.db.read_event(code).await?;
        self.ensure_owner(msg, &event)?;

        let current = event.check_in_code.as_deref().filter(|c| !c.is_empty()).unwrap_or("not set");
        self.reply(
            msg,
            &format!(
                "The current check-in code for '{}' is: {}\nPlease send the new 4-digit check-in code.",
                event.name, current
            ),
        )
        .await;
        Ok(OrganiserState::UpdatingEventCheckInCode { event_id: event.id })
    }

    pub(super) async fn update_check_in_code(&self, msg: &IncomingMessage, event_id: String) -> Result<OrganiserState> {
        let code = msg.input();
        if !is_valid_check_in_code(code) {
            self.reply(msg, "The check-in code must be exactly 4 digits (e.g., 0420). Please try again.").await;
            return Ok(OrganiserState::UpdatingEventCheckInCode { event_id });
        }

        let event = self.db.set_check_in_code(&event_id, code).await?;
        log_event_action(&event.id, "check_in_code_set", msg.user_id, None);

        self.reply(
            msg,
            &format!("The check-in code for '{}' has been set to {}.", event.name, code),
        )
        .await;
        Ok(OrganiserState::Idle)
    }

    pub(super) async fn view_events(&self, msg: &IncomingMessage) {
        match self.db.list_events_by_owner(msg.user_id).await {
            Ok(events) if events.is_empty() => {
                self.reply(msg, "You have not created any events yet.").await;
            }
            Ok(events) => {
                let text = render::organiser_events(&events, &self.participant_username);
                self.outbox.text(msg.chat_id, &text, Markup::None).await;
            }
            Err(e) => {
                error!(user_id = msg.user_id, error = %e, "Failed to list events");
                self.reply(msg, "Error retrieving your events. Please try again.").await;
            }
        }
    }
}
