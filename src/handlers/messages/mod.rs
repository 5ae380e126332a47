//! Incoming message view
//!
//! The conversation engines only need a handful of fields from a Telegram
//! message. [`IncomingMessage`] extracts them so engines can be driven
//! without a live Bot API update.

use teloxide::types::Message;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingMessage {
    pub user_id: i64,
    pub chat_id: i64,
    pub first_name: String,
    pub username: Option<String>,
    /// Message text, or the caption of a photo
    pub text: Option<String>,
    /// File id of the largest variant of an attached photo
    pub photo_file_id: Option<String>,
}

impl IncomingMessage {
    /// Messages without a sender (channel posts) yield `None`
    pub fn from_telegram(msg: &Message) -> Option<Self> {
        let user = msg.from.as_ref()?;

        let photo_file_id = msg.photo().and_then(|sizes| {
            sizes
                .iter()
                .max_by_key(|size| u64::from(size.width) * u64::from(size.height))
                .map(|size| size.file.id.clone())
        });

        Some(Self {
            user_id: user.id.0 as i64,
            chat_id: msg.chat.id.0,
            first_name: user.first_name.clone(),
            username: user.username.clone(),
            text: msg.text().or_else(|| msg.caption()).map(str::to_string),
            photo_file_id,
        })
    }

    /// A text message in the user's private chat
    pub fn from_text(user_id: i64, first_name: &str, text: &str) -> Self {
        Self {
            user_id,
            chat_id: user_id,
            first_name: first_name.to_string(),
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    /// A photo without caption in the user's private chat
    pub fn from_photo(user_id: i64, first_name: &str, file_id: &str) -> Self {
        Self {
            user_id,
            chat_id: user_id,
            first_name: first_name.to_string(),
            photo_file_id: Some(file_id.to_string()),
            ..Default::default()
        }
    }

    /// Trimmed text, empty for photos without caption
    pub fn input(&self) -> &str {
        self.text.as_deref().map(str::trim).unwrap_or("")
    }

    /// Username if set, otherwise the first name
    pub fn display_name(&self) -> &str {
        match self.username.as_deref() {
            Some(username) if !username.is_empty() => username,
            _ => &self.first_name,
        }
    }
}
