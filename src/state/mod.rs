//! State management module
//!
//! This module holds the conversation states of both bots and the per-user
//! session store

pub mod organiser;
pub mod participant;
pub mod storage;

// Re-export commonly used state components
pub use organiser::OrganiserState;
pub use participant::ParticipantState;
pub use storage::SessionStore;
