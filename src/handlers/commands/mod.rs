//! Command definitions for both bots
//!
//! Commands are only interpreted while a user is idle. Commands that take a
//! reference code accept it inline (`/deleteEvent abc123`) or prompt for it.

pub mod help;

use teloxide::utils::command::BotCommands;

/// Organiser bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "camelCase", description = "Organiser commands:")]
pub enum OrganiserCommand {
    #[command(description = "Show the introduction")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Create a new event")]
    AddEvent,
    #[command(description = "Delete one of your events")]
    DeleteEvent(String),
    #[command(description = "List the participants of an event")]
    ListParticipants(String),
    #[command(description = "Send a message to all participants of an event")]
    Blast(String),
    #[command(description = "View all your events")]
    ViewEvents,
    #[command(description = "Set the check-in code of an event")]
    SetCheckInCode(String),
}

/// Participant bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "camelCase", description = "Participant commands:")]
pub enum ParticipantCommand {
    #[command(description = "Start interacting with the bot")]
    Start(String),
    #[command(description = "Show help information")]
    Help,
    #[command(description = "View your upcoming events")]
    ViewEvents,
    #[command(description = "See events you attended previously")]
    PastEvents,
    #[command(description = "Join an event")]
    JoinEvent(String),
    #[command(description = "View or edit your notes for an event")]
    Notes(String),
    #[command(description = "Check in to an event")]
    CheckIn(String),
}

/// Optional inline argument of a command
pub fn argument(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organiser_commands_are_camel_case() {
        assert_eq!(OrganiserCommand::parse("/addEvent", "").unwrap(), OrganiserCommand::AddEvent);
        assert_eq!(OrganiserCommand::parse("/viewEvents", "").unwrap(), OrganiserCommand::ViewEvents);
        assert_eq!(
            OrganiserCommand::parse("/deleteEvent abc123", "").unwrap(),
            OrganiserCommand::DeleteEvent("abc123".to_string())
        );
        assert!(OrganiserCommand::parse("/addevent", "").is_err());
        assert!(OrganiserCommand::parse("hello", "").is_err());
    }

    #[test]
    fn test_participant_start_payload() {
        assert_eq!(
            ParticipantCommand::parse("/start join_abc123", "").unwrap(),
            ParticipantCommand::Start("join_abc123".to_string())
        );
        assert_matches::assert_matches!(
            ParticipantCommand::parse("/start", "").unwrap(),
            ParticipantCommand::Start(payload) if payload.is_empty()
        );
        assert_eq!(ParticipantCommand::parse("/checkIn", "").unwrap(), ParticipantCommand::CheckIn(String::new()));
    }

    #[test]
    fn test_argument() {
        assert_eq!(argument("  abc "), Some("abc"));
        assert_eq!(argument("   "), None);
    }
}
