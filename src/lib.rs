//! EventBot Telegram bots
//!
//! A pair of Telegram bots for running events. Organisers create events with
//! Q&A details and RSVP questions through the organiser bot; participants
//! join, RSVP, check in and keep notes through the participant bot. Both
//! bots share one document store.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventBotError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use handlers::{ConversationEngine, OrganiserBot, ParticipantBot};
pub use state::SessionStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
