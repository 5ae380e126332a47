//! Data models module
//!
//! Documents stored in the `events` and `participants` collections

pub mod event;
pub mod participant;

// Re-export commonly used models
pub use event::{Event, QnA, QuestionType, RsvpQuestion};
pub use participant::{Participant, RsvpAnswer, SignedUpEvent};
