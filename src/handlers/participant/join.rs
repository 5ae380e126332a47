//! Joining events and answering their RSVP questions

use crate::handlers::keyboards;
use crate::handlers::messages::IncomingMessage;
use crate::handlers::render;
use crate::models::{Event, Participant, QuestionType, RsvpAnswer};
use crate::services::gateway::Markup;
use crate::state::ParticipantState;
use crate::utils::errors::{EventBotError, Result};
use crate::utils::helpers::split_multi_select;
use crate::utils::logging::log_event_action;
use super::ParticipantBot;

impl ParticipantBot {
    pub(super) async fn join_event(&self, msg: &IncomingMessage, code: &str) -> Result<ParticipantState> {
        let outcome = match self
            .db
            .create_participant(code, Participant::new(msg.user_id, msg.first_name.as_str()))
            .await
        {
            Ok(outcome) => outcome,
            Err(e) if e.is_not_found() => {
                self.reply(
                    msg,
                    &format!(
                        "Error joining event '{}'. Please check the Reference Code and try again.",
                        code
                    ),
                )
                .await;
                return Ok(ParticipantState::Idle);
            }
            Err(e) => return Err(e),
        };

        let event = outcome.event;
        if outcome.newly_joined {
            log_event_action(&event.id, "joined", msg.user_id, None);
            self.reply(msg, &format!("You have successfully joined event '{}'!", event.name)).await;
        } else {
            self.reply(msg, &format!("You have already joined event '{}'.", event.name)).await;
        }

        if event.edm_file_id.is_some() || event.edm_file_url.is_some() {
            self.images
                .deliver(self.outbox.gateway(), msg.chat_id, event.edm_file_url.as_deref(), Some(&event.name))
                .await;
        }
        self.reply(msg, &render::event_overview(&event)).await;

        let rsvp_complete = outcome
            .participant
            .signed_up_event(&event.id)
            .is_some_and(|signup| signup.is_rsvp_complete(&event));
        if event.rsvp_questions.is_empty() || rsvp_complete {
            return Ok(ParticipantState::Idle);
        }

        self.start_rsvp(msg, event).await
    }

    /// Begin the question loop at the first question
    pub(super) async fn start_rsvp(&self, msg: &IncomingMessage, event: Event) -> Result<ParticipantState> {
        if event.rsvp_questions.is_empty() {
            return Ok(ParticipantState::Idle);
        }

        self.reply(
            msg,
            &format!(
                "'{}' has {} RSVP question(s). Please answer them to complete your sign-up.",
                event.name,
                event.rsvp_questions.len()
            ),
        )
        .await;
        self.ask_question(msg, &event, 0).await;
        Ok(ParticipantState::AnsweringRsvpQuestion { event, index: 0 })
    }

    async fn ask_question(&self, msg: &IncomingMessage, event: &Event, index: usize) {
        let Some(question) = event.rsvp_questions.get(index) else {
            return;
        };

        let prompt = render::rsvp_question_prompt(question, index, event.rsvp_questions.len());
        self.outbox.text(msg.chat_id, &prompt, keyboards::rsvp_answers(question)).await;

        if question.image_file_id.is_some() || question.image_file_url.is_some() {
            self.images
                .deliver(self.outbox.gateway(), msg.chat_id, question.image_file_url.as_deref(), None)
                .await;
        }
    }

    pub(super) async fn answer_rsvp_question(
        &self,
        msg: &IncomingMessage,
        event: Event,
        index: usize,
    ) -> Result<ParticipantState> {
        let Some(question) = event.rsvp_questions.get(index) else {
            return Ok(ParticipantState::Idle);
        };

        let input = msg.input();
        if input.is_empty() {
            self.ask_question(msg, &event, index).await;
            return Ok(ParticipantState::AnsweringRsvpQuestion { event, index });
        }

        let answers = match question.question_type {
            QuestionType::MultiSelect => split_multi_select(input),
            _ => vec![input.to_string()],
        };

        let mut participant = self
            .db
            .read_participant_by_user_id(msg.user_id)
            .await?
            .ok_or(EventBotError::ParticipantDoesNotExist { user_id: msg.user_id })?;
        participant
            .signed_up_event_mut(&event.id)
            .ok_or_else(|| EventBotError::NotRegistered { event_id: event.id.clone() })?
            .upsert_answer(RsvpAnswer { question_id: question.id.clone(), answers });
        self.db.update_participant(&participant).await?;

        let next = index + 1;
        if next < event.rsvp_questions.len() {
            self.ask_question(msg, &event, next).await;
            return Ok(ParticipantState::AnsweringRsvpQuestion { event, index: next });
        }

        log_event_action(&event.id, "rsvp_complete", msg.user_id, None);
        self.outbox
            .text(
                msg.chat_id,
                &format!("Thank you! Your RSVP for '{}' is complete.", event.name),
                Markup::RemoveKeyboard,
            )
            .await;
        Ok(ParticipantState::Idle)
    }
}
