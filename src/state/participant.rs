//! Participant conversation states

use crate::models::Event;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ParticipantState {
    #[default]
    Idle,
    JoinEvent,
    /// `None` until the event whose notes are edited has been chosen
    PersonalNotes { event_id: Option<String> },
    CheckIn,
    /// The code is compared against a fresh read of the event
    EnteringCheckInCode { event_id: String },
    /// Event ids whose RSVP is still incomplete
    SelectEventForRsvp { pending: Vec<String> },
    /// `index` is the question currently awaiting an answer
    AnsweringRsvpQuestion { event: Event, index: usize },
}

impl ParticipantState {
    pub fn name(&self) -> &'static str {
        match self {
            ParticipantState::Idle => "Idle",
            ParticipantState::JoinEvent => "JoinEvent",
            ParticipantState::PersonalNotes { .. } => "PersonalNotes",
            ParticipantState::CheckIn => "CheckIn",
            ParticipantState::EnteringCheckInCode { .. } => "EnteringCheckInCode",
            ParticipantState::SelectEventForRsvp { .. } => "SelectEventForRsvp",
            ParticipantState::AnsweringRsvpQuestion { .. } => "AnsweringRsvpQuestion",
        }
    }
}
