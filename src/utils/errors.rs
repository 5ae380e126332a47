//! Error handling for EventBot
//!
//! This module defines the main error type used by both bots and by the
//! document store, and how each kind of failure should be treated by a
//! conversation.

use thiserror::Error;

/// Main error type for EventBot
#[derive(Error, Debug)]
pub enum EventBotError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: String },

    #[error("Participant does not exist: {user_id}")]
    ParticipantDoesNotExist { user_id: i64 },

    #[error("Not registered for event: {event_id}")]
    NotRegistered { event_id: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Image hosting error: {0}")]
    Image(String),
}

/// Result type alias for EventBot operations
pub type Result<T> = std::result::Result<T, EventBotError>;

impl From<config::ConfigError> for EventBotError {
    fn from(err: config::ConfigError) -> Self {
        EventBotError::Config(err.to_string())
    }
}

impl EventBotError {
    /// Lookups that failed because the referenced record is missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            EventBotError::EventNotFound { .. }
                | EventBotError::ParticipantDoesNotExist { .. }
                | EventBotError::NotRegistered { .. }
        )
    }

    /// Errors caused by the user, as opposed to the infrastructure
    pub fn is_user_facing(&self) -> bool {
        self.is_not_found()
            || matches!(
                self,
                EventBotError::PermissionDenied(_) | EventBotError::InvalidInput(_)
            )
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventBotError::Database(_) => ErrorSeverity::Critical,
            EventBotError::Migration(_) => ErrorSeverity::Critical,
            EventBotError::Config(_) => ErrorSeverity::Critical,
            EventBotError::PermissionDenied(_) => ErrorSeverity::Warning,
            EventBotError::Image(_) => ErrorSeverity::Warning,
            EventBotError::InvalidInput(_) => ErrorSeverity::Info,
            EventBotError::EventNotFound { .. } => ErrorSeverity::Info,
            EventBotError::ParticipantDoesNotExist { .. } => ErrorSeverity::Info,
            EventBotError::NotRegistered { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        let err = EventBotError::EventNotFound { event_id: "abc".to_string() };
        assert!(err.is_not_found());
        assert!(err.is_user_facing());
        assert_eq!(err.severity(), ErrorSeverity::Info);

        let err = EventBotError::ParticipantDoesNotExist { user_id: 1 };
        assert!(err.is_not_found());
    }

    #[test]
    fn test_infrastructure_errors_are_not_user_facing() {
        let err = EventBotError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(!err.is_not_found());
        assert!(!err.is_user_facing());
        assert_eq!(err.severity(), ErrorSeverity::Error);

        let err = EventBotError::Config("missing token".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().to_string(), "CRITICAL");
    }

    #[test]
    fn test_permission_denied_is_user_facing() {
        let err = EventBotError::PermissionDenied("not the owner".to_string());
        assert!(err.is_user_facing());
        assert!(!err.is_not_found());
        assert_eq!(err.severity(), ErrorSeverity::Warning);
    }
}
