//! Messaging gateway
//!
//! The conversation engines describe what to send with [`Markup`] and
//! [`PhotoSource`]; [`TelegramGateway`] turns that into Bot API calls.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, InputFile, KeyboardButton,
    KeyboardMarkup, KeyboardRemove, ReplyMarkup,
};
use url::Url;
use crate::utils::errors::Result;

/// A URL button shown under a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub text: String,
    pub url: String,
}

impl InlineButton {
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self { text: text.into(), url: url.into() }
    }
}

/// Keyboard attached to an outgoing message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Markup {
    /// Leave whatever keyboard the user has
    #[default]
    None,
    /// Hide a previously shown reply keyboard
    RemoveKeyboard,
    /// Reply keyboard, rows of button labels
    Reply(Vec<Vec<String>>),
    /// Buttons attached to the message itself
    Inline(Vec<Vec<InlineButton>>),
}

impl Markup {
    /// One reply button per row
    pub fn reply_column<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Markup::Reply(labels.into_iter().map(|label| vec![label.into()]).collect())
    }

    /// Reply buttons side by side in a single row
    pub fn reply_row<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Markup::Reply(vec![labels.into_iter().map(Into::into).collect()])
    }
}

/// Where the bytes of an outgoing photo come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    /// A file id known to the sending bot
    FileId(String),
    Url(String),
    Bytes { data: Vec<u8>, file_name: String },
}

#[async_trait]
pub trait MessagingGateway: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str, markup: Markup) -> Result<()>;

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: PhotoSource,
        caption: Option<&str>,
        markup: Markup,
    ) -> Result<()>;
}

/// Gateway backed by a teloxide [`Bot`]
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }
}

/// Translate a markup intent into the Bot API representation
pub fn to_reply_markup(markup: Markup) -> Result<Option<ReplyMarkup>> {
    let reply_markup = match markup {
        Markup::None => None,
        Markup::RemoveKeyboard => Some(ReplyMarkup::KeyboardRemove(KeyboardRemove::new())),
        Markup::Reply(rows) => {
            let buttons = rows
                .into_iter()
                .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>())
                .collect::<Vec<_>>();
            let mut keyboard = KeyboardMarkup::new(buttons);
            keyboard.resize_keyboard = true;
            keyboard.one_time_keyboard = true;
            Some(ReplyMarkup::Keyboard(keyboard))
        }
        Markup::Inline(rows) => {
            let mut buttons = Vec::with_capacity(rows.len());
            for row in rows {
                let mut converted = Vec::with_capacity(row.len());
                for button in row {
                    converted.push(InlineKeyboardButton::url(button.text, Url::parse(&button.url)?));
                }
                buttons.push(converted);
            }
            Some(ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(buttons)))
        }
    };
    Ok(reply_markup)
}

fn to_input_file(photo: PhotoSource) -> Result<InputFile> {
    let file = match photo {
        PhotoSource::FileId(id) => InputFile::file_id(id),
        PhotoSource::Url(url) => InputFile::url(Url::parse(&url)?),
        PhotoSource::Bytes { data, file_name } => InputFile::memory(data).file_name(file_name),
    };
    Ok(file)
}

#[async_trait]
impl MessagingGateway for TelegramGateway {
    async fn send_text(&self, chat_id: i64, text: &str, markup: Markup) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if let Some(reply_markup) = to_reply_markup(markup)? {
            request = request.reply_markup(reply_markup);
        }
        request.await?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: PhotoSource,
        caption: Option<&str>,
        markup: Markup,
    ) -> Result<()> {
        let mut request = self.bot.send_photo(ChatId(chat_id), to_input_file(photo)?);
        if let Some(caption) = caption {
            request = request.caption(caption);
        }
        if let Some(reply_markup) = to_reply_markup(markup)? {
            request = request.reply_markup(reply_markup);
        }
        request.await?;
        Ok(())
    }
}
