//! Outbound replies
//!
//! Delivery failures are logged and swallowed; a conversation always carries
//! on as if the message arrived.

use std::sync::Arc;
use crate::services::gateway::{Markup, MessagingGateway, PhotoSource};
use crate::utils::logging::log_send_failure;

#[derive(Clone)]
pub struct Outbox {
    gateway: Arc<dyn MessagingGateway>,
}

impl Outbox {
    pub fn new(gateway: Arc<dyn MessagingGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &dyn MessagingGateway {
        self.gateway.as_ref()
    }

    pub async fn text(&self, chat_id: i64, text: &str, markup: Markup) {
        if let Err(e) = self.gateway.send_text(chat_id, text, markup).await {
            log_send_failure(chat_id, "text", &e.to_string());
        }
    }

    pub async fn photo(&self, chat_id: i64, photo: PhotoSource, caption: Option<&str>, markup: Markup) {
        if let Err(e) = self.gateway.send_photo(chat_id, photo, caption, markup).await {
            log_send_failure(chat_id, "photo", &e.to_string());
        }
    }
}
