//! In-process doubles for the messaging gateway, image hosting and store

use std::collections::HashSet;
use std::sync::Mutex;
use async_trait::async_trait;
use serde_json::Value;
use EventBot::database::{DocumentFilter, DocumentStore};
use EventBot::services::{ImageHosting, Markup, MessagingGateway, PhotoSource};
use EventBot::{EventBotError, Result};

/// One outgoing message captured by [`RecordingGateway`]
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text { chat_id: i64, text: String, markup: Markup },
    Photo { chat_id: i64, photo: PhotoSource, caption: Option<String>, markup: Markup },
}

impl Sent {
    pub fn chat_id(&self) -> i64 {
        match self {
            Sent::Text { chat_id, .. } | Sent::Photo { chat_id, .. } => *chat_id,
        }
    }
}

/// Gateway that records everything and can refuse chosen chats
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<Sent>>,
    failing_chats: Mutex<HashSet<i64>>,
    fail_photos: Mutex<bool>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `chat_id` fail
    pub fn fail_chat(&self, chat_id: i64) {
        self.failing_chats.lock().unwrap().insert(chat_id);
    }

    pub fn fail_photos(&self) {
        *self.fail_photos.lock().unwrap() = true;
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    /// Texts sent to `chat_id`, oldest first
    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Text { chat_id: to, text, .. } if to == chat_id => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_text_to(&self, chat_id: i64) -> Option<String> {
        self.texts_to(chat_id).pop()
    }

    pub fn last_markup_to(&self, chat_id: i64) -> Option<Markup> {
        self.sent().into_iter().rev().find_map(|sent| match sent {
            Sent::Text { chat_id: to, markup, .. } if to == chat_id => Some(markup),
            _ => None,
        })
    }

    pub fn photos_to(&self, chat_id: i64) -> Vec<(PhotoSource, Option<String>)> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Photo { chat_id: to, photo, caption, .. } if to == chat_id => Some((photo, caption)),
                _ => None,
            })
            .collect()
    }

    /// True if any text sent to `chat_id` contains `needle`
    pub fn saw(&self, chat_id: i64, needle: &str) -> bool {
        self.texts_to(chat_id).iter().any(|text| text.contains(needle))
    }

    fn refuses(&self, chat_id: i64) -> bool {
        self.failing_chats.lock().unwrap().contains(&chat_id)
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_text(&self, chat_id: i64, text: &str, markup: Markup) -> Result<()> {
        if self.refuses(chat_id) {
            return Err(EventBotError::InvalidInput(format!("chat {} is blocked", chat_id)));
        }
        self.sent.lock().unwrap().push(Sent::Text { chat_id, text: text.to_string(), markup });
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: PhotoSource,
        caption: Option<&str>,
        markup: Markup,
    ) -> Result<()> {
        if self.refuses(chat_id) || *self.fail_photos.lock().unwrap() {
            return Err(EventBotError::Image(format!("photo to chat {} rejected", chat_id)));
        }
        self.sent.lock().unwrap().push(Sent::Photo {
            chat_id,
            photo,
            caption: caption.map(str::to_string),
            markup,
        });
        Ok(())
    }
}

/// Image host handing out predictable URLs
pub struct FakeImageHost {
    base_url: String,
    broken: Mutex<HashSet<String>>,
}

impl FakeImageHost {
    /// URLs point at a closed local port so downloads fail fast
    pub fn new() -> Self {
        Self::with_base_url("http://127.0.0.1:9/files")
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), broken: Mutex::new(HashSet::new()) }
    }

    /// Make conversion of `file_id` fail
    pub fn break_file(&self, file_id: &str) {
        self.broken.lock().unwrap().insert(file_id.to_string());
    }

    pub fn url_for(&self, file_id: &str) -> String {
        format!("{}/{}.jpg", self.base_url, file_id)
    }
}

#[async_trait]
impl ImageHosting for FakeImageHost {
    async fn durable_url(&self, file_id: &str) -> Result<String> {
        if self.broken.lock().unwrap().contains(file_id) {
            return Err(EventBotError::Image(format!("cannot resolve {}", file_id)));
        }
        Ok(self.url_for(file_id))
    }
}

/// Store whose every operation fails like an unreachable database
pub struct UnavailableStore;

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn create(&self, _collection: &str, _document: Value) -> Result<String> {
        Err(EventBotError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn get(&self, _collection: &str, _id: &str) -> Result<Option<Value>> {
        Err(EventBotError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn set(&self, _collection: &str, _id: &str, _document: Value) -> Result<()> {
        Err(EventBotError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _collection: &str, _id: &str) -> Result<bool> {
        Err(EventBotError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn query(&self, _collection: &str, _filter: &DocumentFilter) -> Result<Vec<Value>> {
        Err(EventBotError::Database(sqlx::Error::PoolTimedOut))
    }
}
