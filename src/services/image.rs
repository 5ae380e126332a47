//! Image hosting and best-effort delivery
//!
//! Photos uploaded to the organiser bot are only addressable by that bot.
//! Before an event is saved every file id is turned into a durable URL, and
//! the participant bot later downloads from that URL to re-upload.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use teloxide::prelude::*;
use tracing::{debug, warn};
use crate::config::ImageConfig;
use crate::models::Event;
use crate::utils::errors::{EventBotError, Result};
use super::gateway::{Markup, MessagingGateway, PhotoSource};

/// Sent when neither the image nor the fallback could be delivered
pub const IMAGE_UNAVAILABLE_NOTICE: &str = "(The image for this item could not be loaded.)";

#[async_trait]
pub trait ImageHosting: Send + Sync {
    /// Convert a transient chat attachment id into a URL that outlives the chat
    async fn durable_url(&self, file_id: &str) -> Result<String>;
}

/// Resolves file ids through the organiser bot's `getFile`
#[derive(Clone)]
pub struct TelegramImageHost {
    bot: Bot,
    file_base_url: String,
}

impl TelegramImageHost {
    pub fn new(bot: Bot, file_base_url: impl Into<String>) -> Self {
        Self { bot, file_base_url: file_base_url.into() }
    }
}

#[async_trait]
impl ImageHosting for TelegramImageHost {
    async fn durable_url(&self, file_id: &str) -> Result<String> {
        let file = self.bot.get_file(file_id.to_string()).await?;
        if file.path.is_empty() {
            return Err(EventBotError::Image(format!("no file path for file id {}", file_id)));
        }

        Ok(format!(
            "{}/bot{}/{}",
            self.file_base_url.trim_end_matches('/'),
            self.bot.token(),
            file.path
        ))
    }
}

/// Fill in the durable URL of every image attached to `event`.
///
/// Conversion failures are logged and leave the URL unset. Returns the
/// number of images that could not be converted.
pub async fn resolve_event_images(host: &dyn ImageHosting, event: &mut Event) -> usize {
    let mut failures = 0;

    if let Some(file_id) = event.edm_file_id.clone() {
        failures += resolve_one(host, &file_id, &mut event.edm_file_url).await;
    }
    for detail in &mut event.event_details {
        if let Some(file_id) = detail.image_file_id.clone() {
            failures += resolve_one(host, &file_id, &mut detail.image_file_url).await;
        }
    }
    for question in &mut event.rsvp_questions {
        if let Some(file_id) = question.image_file_id.clone() {
            failures += resolve_one(host, &file_id, &mut question.image_file_url).await;
        }
    }

    failures
}

async fn resolve_one(host: &dyn ImageHosting, file_id: &str, target: &mut Option<String>) -> usize {
    match host.durable_url(file_id).await {
        Ok(url) => {
            *target = Some(url);
            0
        }
        Err(e) => {
            warn!(file_id = file_id, error = %e, "Could not convert image to a durable URL");
            1
        }
    }
}

/// Sends images without ever failing the conversation
#[derive(Clone)]
pub struct ImageDelivery {
    client: Client,
    fallback_url: Option<String>,
}

impl ImageDelivery {
    pub fn new(config: &ImageConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.download_timeout_seconds))
            .user_agent("EventBot/1.0")
            .build()?;

        Ok(Self {
            client,
            fallback_url: config.fallback_image_url.clone(),
        })
    }

    /// Deliver the image at `url`, falling back to the configured placeholder
    /// and then to a text notice.
    pub async fn deliver(
        &self,
        gateway: &dyn MessagingGateway,
        chat_id: i64,
        url: Option<&str>,
        caption: Option<&str>,
    ) {
        if let Some(url) = url {
            match self.download(url).await {
                Ok(data) => {
                    let photo = PhotoSource::Bytes { data, file_name: file_name_from(url) };
                    match gateway.send_photo(chat_id, photo, caption, Markup::None).await {
                        Ok(()) => return,
                        Err(e) => warn!(chat_id = chat_id, error = %e, "Failed to upload downloaded image"),
                    }
                }
                Err(e) => warn!(chat_id = chat_id, url = url, error = %e, "Failed to download image"),
            }
        }

        if let Some(fallback) = &self.fallback_url {
            warn!(chat_id = chat_id, fallback = %fallback, "Sending fallback image");
            let photo = PhotoSource::Url(fallback.clone());
            match gateway.send_photo(chat_id, photo, caption, Markup::None).await {
                Ok(()) => return,
                Err(e) => warn!(chat_id = chat_id, error = %e, "Failed to send fallback image"),
            }
        } else {
            warn!(chat_id = chat_id, "No fallback image configured");
        }

        if let Err(e) = gateway.send_text(chat_id, IMAGE_UNAVAILABLE_NOTICE, Markup::None).await {
            warn!(chat_id = chat_id, error = %e, "Failed to send image notice");
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url = url, "Downloading image");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(EventBotError::Image(format!("empty response from {}", url)));
        }
        Ok(bytes.to_vec())
    }
}

fn file_name_from(url: &str) -> String {
    url.rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or("image.jpg")
        .to_string()
}
