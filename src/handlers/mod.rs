//! Bot handlers module
//!
//! This module contains both conversation engines and what they share:
//! - Command definitions and help texts
//! - The transport-neutral incoming message
//! - Keyboards, text rendering and the outbound reply helper
//! - The teloxide dispatch schema feeding messages into an engine

pub mod commands;
pub mod dispatch;
pub mod keyboards;
pub mod messages;
pub mod organiser;
pub mod participant;
pub mod render;
pub mod reply;

use async_trait::async_trait;

pub use messages::IncomingMessage;
pub use organiser::OrganiserBot;
pub use participant::ParticipantBot;

/// A per-user conversation driven one message at a time
#[async_trait]
pub trait ConversationEngine: Send + Sync {
    /// Handle one message. Failures are reported to the user, never returned.
    async fn handle_message(&self, msg: IncomingMessage);
}
