//! Document repository operations over the in-memory store

mod helpers;

use std::sync::Arc;
use assert_matches::assert_matches;
use serde_json::json;
use EventBot::database::{DocumentStore, InMemoryDocumentStore, EVENTS, PARTICIPANTS};
use EventBot::models::{Event, Participant};
use EventBot::{DatabaseService, EventBotError};
use helpers::*;

fn service() -> (Arc<InMemoryDocumentStore>, DatabaseService) {
    let store = Arc::new(InMemoryDocumentStore::new());
    (store.clone(), DatabaseService::new(store))
}

fn draft(name: &str, owner: i64) -> Event {
    let mut event = Event::draft(name, owner);
    event.event_date = far_future();
    event
}

#[tokio::test]
async fn test_event_crud() {
    let (_, db) = service();
    let mut event = draft("Demo", ORGANISER);

    let id = db.create_event(&mut event).await.unwrap();
    assert_eq!(event.id, id);
    assert_eq!(id.len(), 20);
    assert_eq!(db.read_event(&id).await.unwrap(), event);

    event.check_in_code = Some("0420".to_string());
    db.update_event(&event).await.unwrap();
    assert_eq!(db.read_event(&id).await.unwrap().check_in_code.as_deref(), Some("0420"));

    db.delete_event(&id).await.unwrap();
    assert_matches!(db.read_event(&id).await, Err(EventBotError::EventNotFound { event_id }) if event_id == id);
    assert_matches!(db.delete_event(&id).await, Err(EventBotError::EventNotFound { .. }));
}

#[tokio::test]
async fn test_list_events_by_owner() {
    let (_, db) = service();
    for (name, owner) in [("A", ORGANISER), ("B", OTHER_ORGANISER), ("C", ORGANISER)] {
        db.create_event(&mut draft(name, owner)).await.unwrap();
    }

    let names: Vec<String> = db
        .list_events_by_owner(ORGANISER)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[tokio::test]
async fn test_create_participant_upserts_by_user_id() {
    let (store, db) = service();
    let mut first = draft("First", ORGANISER);
    let mut second = draft("Second", ORGANISER);
    db.create_event(&mut first).await.unwrap();
    db.create_event(&mut second).await.unwrap();

    let joined = db.create_participant(&first.id, Participant::new(7, "Alice")).await.unwrap();
    assert!(joined.newly_joined);
    let again = db.create_participant(&first.id, Participant::new(7, "Alice")).await.unwrap();
    assert!(!again.newly_joined);
    assert_eq!(again.participant.id, joined.participant.id);

    let other = db.create_participant(&second.id, Participant::new(7, "Alice")).await.unwrap();
    assert!(other.newly_joined);

    assert_eq!(store.count(PARTICIPANTS).await, 1);
    let participant = db.read_participant_by_user_id(7).await.unwrap().unwrap();
    let event_ids: Vec<&str> = participant.signed_up_events.iter().map(|s| s.event_id.as_str()).collect();
    assert_eq!(event_ids, vec![first.id.as_str(), second.id.as_str()]);

    assert_eq!(db.read_event(&first.id).await.unwrap().participants, vec![participant.id.clone()]);
    assert_matches!(
        db.create_participant("missing", Participant::new(8, "Bob")).await,
        Err(EventBotError::EventNotFound { .. })
    );
    assert!(db.read_participant_by_user_id(8).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_keep_every_participant() {
    let (_, db) = service();
    let mut event = draft("Demo", ORGANISER);
    db.create_event(&mut event).await.unwrap();

    let joins = (1..=20).map(|user_id| {
        let db = db.clone();
        let event_id = event.id.clone();
        tokio::spawn(async move { db.create_participant(&event_id, Participant::new(user_id, "Guest")).await })
    });
    for join in futures::future::join_all(joins).await {
        join.unwrap().unwrap();
    }

    assert_eq!(db.read_event(&event.id).await.unwrap().participants.len(), 20);
    assert_eq!(db.list_participants_of_event(&event.id).await.unwrap().len(), 20);
}

#[tokio::test]
async fn test_set_check_in_code_keeps_other_fields() {
    let (_, db) = service();
    let mut event = draft("Demo", ORGANISER);
    db.create_event(&mut event).await.unwrap();
    let stale = db.read_event(&event.id).await.unwrap();
    db.create_participant(&event.id, Participant::new(7, "Alice")).await.unwrap();

    let updated = db.set_check_in_code(&stale.id, "1234").await.unwrap();
    assert_eq!(updated.check_in_code.as_deref(), Some("1234"));
    assert_eq!(db.read_event(&event.id).await.unwrap().participants.len(), 1);
    assert_matches!(db.set_check_in_code("missing", "1234").await, Err(EventBotError::EventNotFound { .. }));
}

#[tokio::test]
async fn test_list_participants_of_event() {
    let (_, db) = service();
    let mut event = draft("Demo", ORGANISER);
    let mut other = draft("Other", ORGANISER);
    db.create_event(&mut event).await.unwrap();
    db.create_event(&mut other).await.unwrap();

    db.create_participant(&event.id, Participant::new(1, "Zoe")).await.unwrap();
    db.create_participant(&other.id, Participant::new(2, "Adam")).await.unwrap();
    db.create_participant(&event.id, Participant::new(3, "Mia")).await.unwrap();

    let names: Vec<String> = db
        .list_participants_of_event(&event.id)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Zoe", "Mia"]);
}

#[tokio::test]
async fn test_events_by_participant() {
    let (_, db) = service();
    assert_matches!(
        db.list_events_by_participant_user_id(42).await,
        Err(EventBotError::ParticipantDoesNotExist { user_id: 42 })
    );

    let mut kept = draft("Kept", ORGANISER);
    let mut gone = draft("Gone", ORGANISER);
    db.create_event(&mut kept).await.unwrap();
    db.create_event(&mut gone).await.unwrap();
    db.create_participant(&kept.id, Participant::new(42, "Alice")).await.unwrap();
    db.create_participant(&gone.id, Participant::new(42, "Alice")).await.unwrap();
    db.delete_event(&gone.id).await.unwrap();

    let events = db.list_events_by_participant_user_id(42).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, kept.id);
}

#[tokio::test]
async fn test_documents_use_stable_field_names() {
    let (store, db) = service();
    let mut event = draft("Demo", ORGANISER);
    db.create_event(&mut event).await.unwrap();
    db.create_participant(&event.id, Participant::new(9, "Alice")).await.unwrap();

    let raw = store.get(EVENTS, &event.id).await.unwrap().unwrap();
    assert_eq!(raw["userid"], json!(ORGANISER));
    assert_eq!(raw["eventDate"], json!("2999-01-01"));
    assert!(raw["participants"].is_array());

    let participant = db.read_participant_by_user_id(9).await.unwrap().unwrap();
    let raw = store.get(PARTICIPANTS, &participant.id).await.unwrap().unwrap();
    assert_eq!(raw["signedUpEvents"][0]["eventID"], json!(event.id));
    assert_eq!(raw["signedUpEvents"][0]["checkedIn"], json!(false));
}

#[tokio::test]
async fn test_store_failures_propagate() {
    let db = DatabaseService::new(Arc::new(UnavailableStore));
    assert_matches!(db.read_event("x").await, Err(EventBotError::Database(_)));
    assert_matches!(db.list_events_by_owner(1).await, Err(EventBotError::Database(_)));
}
