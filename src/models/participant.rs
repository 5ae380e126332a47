//! Participant model

use serde::{Deserialize, Serialize};
use super::event::Event;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsvpAnswer {
    #[serde(rename = "questionID")]
    pub question_id: String,
    #[serde(default)]
    pub answers: Vec<String>,
}

/// A participant's registration for one event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignedUpEvent {
    #[serde(rename = "eventID")]
    pub event_id: String,
    #[serde(rename = "personalNotes", default)]
    pub personal_notes: String,
    #[serde(rename = "checkedIn", default)]
    pub checked_in: bool,
    #[serde(rename = "rsvpAnswers", default)]
    pub rsvp_answers: Vec<RsvpAnswer>,
}

impl SignedUpEvent {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            ..Default::default()
        }
    }

    /// Replace the answer for the same question id, or append it
    pub fn upsert_answer(&mut self, answer: RsvpAnswer) {
        match self
            .rsvp_answers
            .iter_mut()
            .find(|existing| existing.question_id == answer.question_id)
        {
            Some(existing) => existing.answers = answer.answers,
            None => self.rsvp_answers.push(answer),
        }
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&RsvpAnswer> {
        self.rsvp_answers.iter().find(|a| a.question_id == question_id)
    }

    /// Every RSVP question of `event` has an answer
    pub fn is_rsvp_complete(&self, event: &Event) -> bool {
        event
            .rsvp_questions
            .iter()
            .all(|question| self.answer_for(&question.id).is_some())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "userid")]
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "signedUpEvents", default)]
    pub signed_up_events: Vec<SignedUpEvent>,
}

impl Participant {
    pub fn new(user_id: i64, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn signed_up_event(&self, event_id: &str) -> Option<&SignedUpEvent> {
        self.signed_up_events.iter().find(|s| s.event_id == event_id)
    }

    pub fn signed_up_event_mut(&mut self, event_id: &str) -> Option<&mut SignedUpEvent> {
        self.signed_up_events.iter_mut().find(|s| s.event_id == event_id)
    }

    /// Register for an event. Returns false if already registered.
    pub fn sign_up(&mut self, event_id: &str) -> bool {
        if self.signed_up_event(event_id).is_some() {
            return false;
        }
        self.signed_up_events.push(SignedUpEvent::new(event_id));
        true
    }

    pub fn is_signed_up(&self, event_id: &str) -> bool {
        self.signed_up_event(event_id).is_some()
    }
}
