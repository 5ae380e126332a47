//! Organiser conversation states
//!
//! Each variant owns exactly the data collected so far, so leaving a state
//! (for example on `Cancel`) drops whatever was in progress.

use crate::models::{Event, QnA, RsvpQuestion};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum OrganiserState {
    #[default]
    Idle,
    AddingEventName,
    AddingEventDate { event: Event },
    AddingEventPicture { event: Event },
    AddingEventDetails { event: Event },
    /// Question accepted, deciding whether it gets an image
    AddingEventDetailsImage { event: Event, question: String },
    AddingEventDetailsImageUpload { event: Event, question: String },
    /// Waiting for the answer that completes `pending`
    AddingEventDetailsAnswer { event: Event, pending: QnA },
    AddingRsvpQuestion { event: Event },
    SelectingRsvpType { event: Event, question: RsvpQuestion },
    AddingRsvpOptions { event: Event, question: RsvpQuestion, options: Vec<String> },
    AddingRsvpImage { event: Event, question: RsvpQuestion },
    /// Waiting for the RSVP question's photo or `skip`
    ConfirmRsvpQuestion { event: Event, question: RsvpQuestion },
    DeleteEvent,
    ListParticipants,
    /// `None` until the target event has been resolved
    BlastMessage { event: Option<Event> },
    SettingEventCheckInCode,
    /// The event is re-read before the new code is written
    UpdatingEventCheckInCode { event_id: String },
}

impl OrganiserState {
    pub fn name(&self) -> &'static str {
        match self {
            OrganiserState::Idle => "Idle",
            OrganiserState::AddingEventName => "AddingEventName",
            OrganiserState::AddingEventDate { .. } => "AddingEventDate",
            OrganiserState::AddingEventPicture { .. } => "AddingEventPicture",
            OrganiserState::AddingEventDetails { .. } => "AddingEventDetails",
            OrganiserState::AddingEventDetailsImage { .. } => "AddingEventDetailsImage",
            OrganiserState::AddingEventDetailsImageUpload { .. } => "AddingEventDetailsImageUpload",
            OrganiserState::AddingEventDetailsAnswer { .. } => "AddingEventDetailsAnswer",
            OrganiserState::AddingRsvpQuestion { .. } => "AddingRsvpQuestion",
            OrganiserState::SelectingRsvpType { .. } => "SelectingRsvpType",
            OrganiserState::AddingRsvpOptions { .. } => "AddingRsvpOptions",
            OrganiserState::AddingRsvpImage { .. } => "AddingRsvpImage",
            OrganiserState::ConfirmRsvpQuestion { .. } => "ConfirmRsvpQuestion",
            OrganiserState::DeleteEvent => "DeleteEvent",
            OrganiserState::ListParticipants => "ListParticipants",
            OrganiserState::BlastMessage { .. } => "BlastMessage",
            OrganiserState::SettingEventCheckInCode => "SettingEventCheckInCode",
            OrganiserState::UpdatingEventCheckInCode { .. } => "UpdatingEventCheckInCode",
        }
    }

    /// States between `/addEvent` and the event being saved
    pub fn is_authoring(&self) -> bool {
        matches!(
            self,
            OrganiserState::AddingEventName
                | OrganiserState::AddingEventDate { .. }
                | OrganiserState::AddingEventPicture { .. }
                | OrganiserState::AddingEventDetails { .. }
                | OrganiserState::AddingEventDetailsImage { .. }
                | OrganiserState::AddingEventDetailsImageUpload { .. }
                | OrganiserState::AddingEventDetailsAnswer { .. }
                | OrganiserState::AddingRsvpQuestion { .. }
                | OrganiserState::SelectingRsvpType { .. }
                | OrganiserState::AddingRsvpOptions { .. }
                | OrganiserState::AddingRsvpImage { .. }
                | OrganiserState::ConfirmRsvpQuestion { .. }
        )
    }

    /// The event being authored or operated on, if any
    pub fn current_event(&self) -> Option<&Event> {
        match self {
            OrganiserState::AddingEventDate { event }
            | OrganiserState::AddingEventPicture { event }
            | OrganiserState::AddingEventDetails { event }
            | OrganiserState::AddingEventDetailsImage { event, .. }
            | OrganiserState::AddingEventDetailsImageUpload { event, .. }
            | OrganiserState::AddingEventDetailsAnswer { event, .. }
            | OrganiserState::AddingRsvpQuestion { event }
            | OrganiserState::SelectingRsvpType { event, .. }
            | OrganiserState::AddingRsvpOptions { event, .. }
            | OrganiserState::AddingRsvpImage { event, .. }
            | OrganiserState::ConfirmRsvpQuestion { event, .. } => Some(event),
            OrganiserState::BlastMessage { event } => event.as_ref(),
            _ => None,
        }
    }
}
