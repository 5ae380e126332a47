//! Event authoring: `/addEvent` through to the saved event

use tracing::warn;
use crate::handlers::keyboards;
use crate::handlers::messages::IncomingMessage;
use crate::handlers::render;
use crate::models::{Event, QnA, QuestionType, RsvpQuestion};
use crate::services::gateway::{Markup, PhotoSource};
use crate::services::image::resolve_event_images;
use crate::state::OrganiserState;
use crate::utils::errors::Result;
use crate::utils::helpers::{format_date, generate_uuid, join_deep_link, parse_event_date, today};
use crate::utils::logging::log_event_action;
use super::OrganiserBot;

const RSVP_PROMPT: &str = "Now you can add RSVP questions for participants to answer when they join. \
Send the first question, or 'skip' to save the event without RSVP questions.";

const NEXT_RSVP_PROMPT: &str = "RSVP question added. Send another RSVP question, or 'done' to save the event.";

fn is_word(input: &str, word: &str) -> bool {
    input.eq_ignore_ascii_case(word)
}

impl OrganiserBot {
    pub(super) async fn add_event_name(&self, msg: &IncomingMessage) -> Result<OrganiserState> {
        let name = msg.input();
        if name.is_empty() {
            self.outbox
                .text(msg.chat_id, "Please send the name of the event as text.", keyboards::cancel())
                .await;
            return Ok(OrganiserState::AddingEventName);
        }

        let event = Event::draft(name, msg.user_id);
        self.outbox
            .text(
                msg.chat_id,
                "Great! Now, please send me the date of the event in this format: 'YYYY-MM-DD'.",
                keyboards::cancel(),
            )
            .await;
        Ok(OrganiserState::AddingEventDate { event })
    }

    pub(super) async fn add_event_date(&self, msg: &IncomingMessage, mut event: Event) -> Result<OrganiserState> {
        let Some(date) = parse_event_date(msg.input(), today()) else {
            self.outbox
                .text(
                    msg.chat_id,
                    "Invalid date format. Please use 'YYYY-MM-DD' (e.g., 2025-12-25) and ensure it's not in the past.",
                    keyboards::cancel(),
                )
                .await;
            return Ok(OrganiserState::AddingEventDate { event });
        };

        event.event_date = date;
        self.outbox
            .text(
                msg.chat_id,
                "Got it. Please send a picture for the event (this will be shown to participants).",
                keyboards::cancel(),
            )
            .await;
        Ok(OrganiserState::AddingEventPicture { event })
    }

    pub(super) async fn add_event_picture(&self, msg: &IncomingMessage, mut event: Event) -> Result<OrganiserState> {
        let Some(file_id) = &msg.photo_file_id else {
            self.outbox.text(msg.chat_id, "Please send a picture file.", keyboards::cancel()).await;
            return Ok(OrganiserState::AddingEventPicture { event });
        };

        event.edm_file_id = Some(file_id.clone());
        self.outbox
            .text(
                msg.chat_id,
                "Got it! Now, let's add some details. Send a question participants may ask \
                 (ending with '?'), or 'done' when you have no more details to add.",
                keyboards::done_or_cancel(),
            )
            .await;
        Ok(OrganiserState::AddingEventDetails { event })
    }

    pub(super) async fn add_event_detail_question(&self, msg: &IncomingMessage, event: Event) -> Result<OrganiserState> {
        let input = msg.input();
        if is_word(input, "done") {
            self.outbox.text(msg.chat_id, RSVP_PROMPT, keyboards::skip_or_cancel()).await;
            return Ok(OrganiserState::AddingRsvpQuestion { event });
        }

        if input.is_empty() || !input.ends_with('?') {
            self.outbox
                .text(
                    msg.chat_id,
                    "Please make sure your question ends with a question mark '?'.",
                    keyboards::done_or_cancel(),
                )
                .await;
            return Ok(OrganiserState::AddingEventDetails { event });
        }

        self.outbox
            .text(
                msg.chat_id,
                "Would you like to add an image to this detail?",
                keyboards::detail_image_choice(),
            )
            .await;
        Ok(OrganiserState::AddingEventDetailsImage { event, question: input.to_string() })
    }

    pub(super) async fn choose_detail_image(
        &self,
        msg: &IncomingMessage,
        event: Event,
        question: String,
    ) -> Result<OrganiserState> {
        if msg.input() == keyboards::ADD_IMAGE {
            self.outbox
                .text(msg.chat_id, "Please send the image, or 'skip' to continue without one.", keyboards::skip_or_cancel())
                .await;
            return Ok(OrganiserState::AddingEventDetailsImageUpload { event, question });
        }

        self.prompt_detail_answer(msg, &question).await;
        let pending = QnA { question, ..Default::default() };
        Ok(OrganiserState::AddingEventDetailsAnswer { event, pending })
    }

    pub(super) async fn upload_detail_image(
        &self,
        msg: &IncomingMessage,
        event: Event,
        question: String,
    ) -> Result<OrganiserState> {
        let image_file_id = match &msg.photo_file_id {
            Some(file_id) => Some(file_id.clone()),
            None if is_word(msg.input(), "skip") => None,
            None => {
                self.outbox
                    .text(msg.chat_id, "Please send a picture file, or 'skip'.", keyboards::skip_or_cancel())
                    .await;
                return Ok(OrganiserState::AddingEventDetailsImageUpload { event, question });
            }
        };

        self.prompt_detail_answer(msg, &question).await;
        let pending = QnA { question, image_file_id, ..Default::default() };
        Ok(OrganiserState::AddingEventDetailsAnswer { event, pending })
    }

    async fn prompt_detail_answer(&self, msg: &IncomingMessage, question: &str) {
        self.outbox
            .text(msg.chat_id, &format!("What's the answer to '{}'?", question), keyboards::cancel())
            .await;
    }

    pub(super) async fn add_event_detail_answer(
        &self,
        msg: &IncomingMessage,
        mut event: Event,
        mut pending: QnA,
    ) -> Result<OrganiserState> {
        let answer = msg.input();
        if answer.is_empty() {
            self.prompt_detail_answer(msg, &pending.question).await;
            return Ok(OrganiserState::AddingEventDetailsAnswer { event, pending });
        }

        pending.answer = answer.to_string();
        event.event_details.push(pending);
        self.outbox
            .text(
                msg.chat_id,
                "Detail added. Send another question or 'done' to finish.",
                keyboards::done_or_cancel(),
            )
            .await;
        Ok(OrganiserState::AddingEventDetails { event })
    }

    pub(super) async fn add_rsvp_question(&self, msg: &IncomingMessage, event: Event) -> Result<OrganiserState> {
        let input = msg.input();
        if is_word(input, "skip") || is_word(input, "done") {
            return self.publish_event(msg, event).await;
        }
        if input.is_empty() {
            self.outbox
                .text(msg.chat_id, "Please send the RSVP question as text, or 'skip'.", keyboards::skip_or_cancel())
                .await;
            return Ok(OrganiserState::AddingRsvpQuestion { event });
        }

        let question = RsvpQuestion::new(generate_uuid(), input.to_string());
        self.outbox.text(msg.chat_id, render::rsvp_type_menu(), keyboards::rsvp_types()).await;
        Ok(OrganiserState::SelectingRsvpType { event, question })
    }

    pub(super) async fn select_rsvp_type(
        &self,
        msg: &IncomingMessage,
        event: Event,
        mut question: RsvpQuestion,
    ) -> Result<OrganiserState> {
        let Some(question_type) = QuestionType::from_choice(msg.input()) else {
            self.outbox
                .text(
                    msg.chat_id,
                    &format!("Invalid choice. {}", render::rsvp_type_menu()),
                    keyboards::rsvp_types(),
                )
                .await;
            return Ok(OrganiserState::SelectingRsvpType { event, question });
        };

        question.set_type(question_type);
        if question_type.needs_options() {
            self.outbox
                .text(msg.chat_id, "Please send option 1.", keyboards::cancel())
                .await;
            return Ok(OrganiserState::AddingRsvpOptions { event, question, options: Vec::new() });
        }

        self.prompt_rsvp_image(msg).await;
        Ok(OrganiserState::AddingRsvpImage { event, question })
    }

    pub(super) async fn add_rsvp_option(
        &self,
        msg: &IncomingMessage,
        event: Event,
        mut question: RsvpQuestion,
        mut options: Vec<String>,
    ) -> Result<OrganiserState> {
        let input = msg.input();
        if is_word(input, "done") {
            if options.len() < 2 {
                self.outbox
                    .text(
                        msg.chat_id,
                        &format!("Please add at least 2 options. Send option {}.", options.len() + 1),
                        keyboards::cancel(),
                    )
                    .await;
                return Ok(OrganiserState::AddingRsvpOptions { event, question, options });
            }
            question.options = options;
            self.prompt_rsvp_image(msg).await;
            return Ok(OrganiserState::AddingRsvpImage { event, question });
        }

        if input.is_empty() {
            self.outbox
                .text(msg.chat_id, &format!("Please send option {} as text.", options.len() + 1), keyboards::cancel())
                .await;
            return Ok(OrganiserState::AddingRsvpOptions { event, question, options });
        }

        options.push(input.to_string());
        let markup = if options.len() >= 2 { keyboards::done_or_cancel() } else { keyboards::cancel() };
        self.outbox
            .text(
                msg.chat_id,
                &format!("Option {} added. Send option {}, or 'done' to finish.", options.len(), options.len() + 1),
                markup,
            )
            .await;
        Ok(OrganiserState::AddingRsvpOptions { event, question, options })
    }

    async fn prompt_rsvp_image(&self, msg: &IncomingMessage) {
        self.outbox
            .text(
                msg.chat_id,
                "Would you like to add an image to this RSVP question? (yes/no)",
                keyboards::yes_no_or_cancel(),
            )
            .await;
    }

    pub(super) async fn choose_rsvp_image(
        &self,
        msg: &IncomingMessage,
        mut event: Event,
        question: RsvpQuestion,
    ) -> Result<OrganiserState> {
        let input = msg.input();
        if is_word(input, "yes") {
            self.outbox
                .text(msg.chat_id, "Please send the image, or 'skip' to continue without one.", keyboards::skip_or_cancel())
                .await;
            return Ok(OrganiserState::ConfirmRsvpQuestion { event, question });
        }
        if is_word(input, "no") {
            event.rsvp_questions.push(question);
            self.outbox.text(msg.chat_id, NEXT_RSVP_PROMPT, keyboards::done_or_cancel()).await;
            return Ok(OrganiserState::AddingRsvpQuestion { event });
        }

        self.prompt_rsvp_image(msg).await;
        Ok(OrganiserState::AddingRsvpImage { event, question })
    }

    pub(super) async fn confirm_rsvp_question(
        &self,
        msg: &IncomingMessage,
        mut event: Event,
        mut question: RsvpQuestion,
    ) -> Result<OrganiserState> {
        match &msg.photo_file_id {
            Some(file_id) => question.image_file_id = Some(file_id.clone()),
            None if is_word(msg.input(), "skip") => {}
            None => {
                self.outbox
                    .text(msg.chat_id, "Please send a picture file, or 'skip'.", keyboards::skip_or_cancel())
                    .await;
                return Ok(OrganiserState::ConfirmRsvpQuestion { event, question });
            }
        }

        event.rsvp_questions.push(question);
        self.outbox.text(msg.chat_id, NEXT_RSVP_PROMPT, keyboards::done_or_cancel()).await;
        Ok(OrganiserState::AddingRsvpQuestion { event })
    }

    /// Save the authored event and send the confirmation with its join link
    async fn publish_event(&self, msg: &IncomingMessage, mut event: Event) -> Result<OrganiserState> {
        let failed_images = resolve_event_images(self.images.as_ref(), &mut event).await;

        if let Err(e) = self.db.create_event(&mut event).await {
            warn!(user_id = msg.user_id, error = %e, "Failed to save event");
            self.outbox
                .text(msg.chat_id, "Error creating event. Please try again.", Markup::RemoveKeyboard)
                .await;
            return Ok(OrganiserState::Idle);
        }
        log_event_action(&event.id, "created", msg.user_id, Some(&event.name));

        let link = join_deep_link(&self.participant_username, &event.id);
        let mut confirmation = format!(
            "Event '{}' created successfully!\nDate: {}\nReference Code: {}\n\
             Share this link with participants so they can join:\n{}",
            event.name,
            format_date(event.event_date),
            event.id,
            link
        );
        if failed_images > 0 {
            confirmation.push_str(&format!(
                "\n\nNote: {} image(s) could not be prepared for participants and will not be shown.",
                failed_images
            ));
        }

        if let Some(file_id) = &event.edm_file_id {
            self.outbox
                .photo(
                    msg.chat_id,
                    PhotoSource::FileId(file_id.clone()),
                    Some(&event.name),
                    Markup::RemoveKeyboard,
                )
                .await;
        }
        self.outbox.text(msg.chat_id, &confirmation, keyboards::join_link(&link)).await;

        Ok(OrganiserState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::is_word;

    #[test]
    fn test_keywords_ignore_case() {
        assert!(is_word("DONE", "done"));
        assert!(is_word("Skip", "skip"));
        assert!(!is_word("done!", "done"));
    }
}
