//! `/viewEvents`, `/pastEvents` and picking an event to finish its RSVP

use crate::handlers::keyboards;
use crate::handlers::messages::IncomingMessage;
use crate::handlers::render;
use crate::models::{Event, Participant, SignedUpEvent};
use crate::services::gateway::Markup;
use crate::state::ParticipantState;
use crate::utils::errors::{EventBotError, Result};
use crate::utils::helpers::today;
use super::ParticipantBot;

fn signup_for<'a>(participant: Option<&'a Participant>, event: &Event) -> Option<&'a SignedUpEvent> {
    participant.and_then(|p| p.signed_up_event(&event.id))
}

impl ParticipantBot {
    /// List signed-up events on or after today (`upcoming`) or before today.
    ///
    /// Only the upcoming listing offers to complete pending RSVPs.
    pub(super) async fn list_events(&self, msg: &IncomingMessage, upcoming: bool) -> Result<ParticipantState> {
        let events = match self.db.list_events_by_participant_user_id(msg.user_id).await {
            Ok(events) => events,
            Err(EventBotError::ParticipantDoesNotExist { .. }) => {
                self.reply(msg, "You are not signed up for any events.").await;
                return Ok(ParticipantState::Idle);
            }
            Err(e) => return Err(e),
        };
        let participant = self.db.read_participant_by_user_id(msg.user_id).await?;

        let today = today();
        let mut events: Vec<Event> = events
            .into_iter()
            .filter(|event| (event.event_date >= today) == upcoming)
            .collect();
        events.sort_by(|a, b| b.event_date.cmp(&a.event_date));

        if events.is_empty() {
            let text = if upcoming { "You have no upcoming events." } else { "You have no past events." };
            self.reply(msg, text).await;
            return Ok(ParticipantState::Idle);
        }

        let participant = participant.as_ref();
        let (complete, pending): (Vec<&Event>, Vec<&Event>) = events
            .iter()
            .partition(|event| signup_for(participant, event).is_some_and(|s| s.is_rsvp_complete(event)));

        let mut text = String::from(if upcoming { "Your upcoming events:\n" } else { "Your past events:\n" });
        if !pending.is_empty() {
            text.push_str("\nRSVP incomplete:\n");
            for event in &pending {
                text.push_str(&render::participant_event_entry(event, signup_for(participant, event)));
            }
        }
        if !complete.is_empty() {
            text.push_str("\nRSVP complete:\n");
            for event in &complete {
                text.push_str(&render::participant_event_entry(event, signup_for(participant, event)));
            }
        }
        self.reply(msg, &text).await;

        if !upcoming || pending.is_empty() {
            return Ok(ParticipantState::Idle);
        }

        let pending_ids: Vec<String> = pending.iter().map(|event| event.id.clone()).collect();
        if let [only] = pending.as_slice() {
            self.outbox
                .text(
                    msg.chat_id,
                    &format!(
                        "You have not completed the RSVP for '{}'. Would you like to do it now? (yes/no, or 0 to skip)",
                        only.name
                    ),
                    keyboards::yes_no_or_skip(),
                )
                .await;
        } else {
            let mut prompt = String::from("You have incomplete RSVPs for these events:\n");
            for (number, event) in pending.iter().enumerate() {
                prompt.push_str(&format!("{}. {}\n", number + 1, event.name));
            }
            prompt.push_str("Send the number of the event to complete its RSVP now, or 0 to skip.");
            self.outbox
                .text(msg.chat_id, &prompt, keyboards::numbered_choice(pending.len()))
                .await;
        }

        Ok(ParticipantState::SelectEventForRsvp { pending: pending_ids })
    }

    pub(super) async fn select_rsvp_event(&self, msg: &IncomingMessage, pending: Vec<String>) -> Result<ParticipantState> {
        let input = msg.input();
        let later = "Okay, you can complete your RSVP later with /viewEvents.";

        if input == "0" {
            self.outbox.text(msg.chat_id, later, Markup::RemoveKeyboard).await;
            return Ok(ParticipantState::Idle);
        }

        let chosen = if let [only] = pending.as_slice() {
            if input.eq_ignore_ascii_case("no") {
                self.outbox.text(msg.chat_id, later, Markup::RemoveKeyboard).await;
                return Ok(ParticipantState::Idle);
            }
            input.eq_ignore_ascii_case("yes").then(|| only.clone())
        } else {
            input
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|index| pending.get(index).cloned())
        };

        let Some(event_id) = chosen else {
            let (text, markup) = if pending.len() == 1 {
                ("Please answer yes or no, or 0 to skip.".to_string(), keyboards::yes_no_or_skip())
            } else {
                (
                    format!("Please send a number between 1 and {}, or 0 to skip.", pending.len()),
                    keyboards::numbered_choice(pending.len()),
                )
            };
            self.outbox.text(msg.chat_id, &text, markup).await;
            return Ok(ParticipantState::SelectEventForRsvp { pending });
        };

        let event = self.db.read_event(&event_id).await?;
        self.start_rsvp(msg, event).await
    }
}
