//! Database repositories module
//!
//! Typed access to the `events` and `participants` collections

pub mod event;
pub mod participant;

// Re-export repositories
pub use event::EventRepository;
pub use participant::ParticipantRepository;
