//! Database module
//!
//! This module handles the document store and the repositories built on it

pub mod connection;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::{DatabasePool, create_pool, run_migrations, health_check, open_document_store};
pub use repositories::{EventRepository, ParticipantRepository};
pub use service::{DatabaseService, JoinOutcome};
pub use store::{DocumentFilter, DocumentStore, InMemoryDocumentStore, PgDocumentStore, EVENTS, PARTICIPANTS};
