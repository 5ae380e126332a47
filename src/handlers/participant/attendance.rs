//! Check-in and personal notes

use crate::handlers::keyboards;
use crate::handlers::messages::IncomingMessage;
use crate::models::Participant;
use crate::services::gateway::Markup;
use crate::state::ParticipantState;
use crate::utils::errors::{EventBotError, Result};
use crate::utils::helpers::{format_date, today};
use crate::utils::logging::log_event_action;
use super::ParticipantBot;

impl ParticipantBot {
    async fn registered_participant(&self, msg: &IncomingMessage, event_id: &str) -> Result<Participant> {
        let participant = self
            .db
            .read_participant_by_user_id(msg.user_id)
            .await?
            .filter(|p| p.is_signed_up(event_id));
        participant.ok_or_else(|| EventBotError::NotRegistered { event_id: event_id.to_string() })
    }

    /// First check-in turn: every precondition is checked before asking for the code
    pub(super) async fn start_check_in(&self, msg: &IncomingMessage, code: &str) -> Result<ParticipantState> {
        let event = self.db.read_event(code).await?;

        if !event.has_check_in_code() {
            self.reply(
                msg,
                &format!(
                    "No check-in code has been set for '{}' yet. Please check with the organiser.",
                    event.name
                ),
            )
            .await;
            return Ok(ParticipantState::Idle);
        }

        if today() != event.event_date {
            self.reply(
                msg,
                &format!(
                    "Check-in for '{}' is only open on the event date ({}).",
                    event.name,
                    format_date(event.event_date)
                ),
            )
            .await;
            return Ok(ParticipantState::Idle);
        }

        let participant = match self.registered_participant(msg, &event.id).await {
            Ok(participant) => participant,
            Err(EventBotError::NotRegistered { .. }) => {
                self.reply(
                    msg,
                    &format!("You are not registered for '{}'. Use /joinEvent to join it first.", event.name),
                )
                .await;
                return Ok(ParticipantState::Idle);
            }
            Err(e) => return Err(e),
        };

        if participant.signed_up_event(&event.id).is_some_and(|s| s.checked_in) {
            self.reply(msg, &format!("You have already checked in to '{}'.", event.name)).await;
            return Ok(ParticipantState::Idle);
        }

        self.reply(msg, &format!("Please enter the 4-digit check-in code for '{}'.", event.name)).await;
        Ok(ParticipantState::EnteringCheckInCode { event_id: event.id })
    }

    pub(super) async fn enter_check_in_code(&self, msg: &IncomingMessage, event_id: &str) -> Result<ParticipantState> {
        let event = self.db.read_event(event_id).await?;
        if event.check_in_code.as_deref() != Some(msg.input()) {
            self.reply(msg, "Incorrect code. Check-in failed. Use /checkIn to try again.").await;
            return Ok(ParticipantState::Idle);
        }

        let mut participant = self.registered_participant(msg, &event.id).await?;
        if let Some(signup) = participant.signed_up_event_mut(&event.id) {
            signup.checked_in = true;
        }
        self.db.update_participant(&participant).await?;
        log_event_action(&event.id, "checked_in", msg.user_id, None);

        self.reply(
            msg,
            &format!(
                "Thank you {}, check in to '{}' is successful. Enjoy your time here!",
                msg.display_name(),
                event.name
            ),
        )
        .await;
        Ok(ParticipantState::Idle)
    }

    /// First notes turn: show the notes and ask whether to change them
    pub(super) async fn select_notes_event(&self, msg: &IncomingMessage, code: &str) -> Result<ParticipantState> {
        let event = self.db.read_event(code).await?;
        let participant = self.registered_participant(msg, &event.id).await?;
        let notes = participant
            .signed_up_event(&event.id)
            .map(|signup| signup.personal_notes.as_str())
            .unwrap_or_default();

        let mut text = if notes.is_empty() {
            format!("You have no notes for '{}' yet.", event.name)
        } else {
            format!("Your notes for '{}':\n{}", event.name, notes)
        };
        text.push_str("\n\nWould you like to modify your notes? (yes/no)");
        self.outbox.text(msg.chat_id, &text, keyboards::yes_no()).await;

        Ok(ParticipantState::PersonalNotes { event_id: Some(event.id) })
    }

    /// Second notes turn: `yes` asks for the text, `no` leaves the notes alone,
    /// anything else becomes the new notes
    pub(super) async fn edit_notes(&self, msg: &IncomingMessage, event_id: String) -> Result<ParticipantState> {
        let input = msg.input();
        if input.eq_ignore_ascii_case("yes") {
            self.outbox
                .text(msg.chat_id, "Please send your new notes.", Markup::RemoveKeyboard)
                .await;
            return Ok(ParticipantState::PersonalNotes { event_id: Some(event_id) });
        }
        if input.eq_ignore_ascii_case("no") {
            self.outbox
                .text(msg.chat_id, "Okay, your notes are unchanged.", Markup::RemoveKeyboard)
                .await;
            return Ok(ParticipantState::Idle);
        }
        if input.is_empty() {
            self.reply(msg, "Please send your notes as text.").await;
            return Ok(ParticipantState::PersonalNotes { event_id: Some(event_id) });
        }

        let mut participant = self.registered_participant(msg, &event_id).await?;
        if let Some(signup) = participant.signed_up_event_mut(&event_id) {
            signup.personal_notes = input.to_string();
        }
        self.db.update_participant(&participant).await?;
        log_event_action(&event_id, "notes_saved", msg.user_id, None);

        self.outbox
            .text(msg.chat_id, "Your notes have been saved!", Markup::RemoveKeyboard)
            .await;
        Ok(ParticipantState::Idle)
    }
}
