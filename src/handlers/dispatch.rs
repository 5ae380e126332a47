//! Teloxide dispatch schema

use std::sync::Arc;
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use tracing::debug;
use super::{ConversationEngine, IncomingMessage};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Route every message to the engine `E` registered as a dependency
pub fn schema<E>() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>>
where
    E: ConversationEngine + 'static,
{
    Update::filter_message().endpoint(handle_update::<E>)
}

async fn handle_update<E>(msg: Message, engine: Arc<E>) -> HandlerResult
where
    E: ConversationEngine + 'static,
{
    match IncomingMessage::from_telegram(&msg) {
        Some(incoming) => engine.handle_message(incoming).await,
        None => debug!(chat_id = msg.chat.id.0, "Ignoring message without sender"),
    }
    Ok(())
}

/// Build a dispatcher running `engine` on `bot`
pub fn build_dispatcher<E>(
    bot: Bot,
    engine: Arc<E>,
) -> Dispatcher<Bot, Box<dyn std::error::Error + Send + Sync + 'static>, teloxide::dispatching::DefaultKey>
where
    E: ConversationEngine + 'static,
{
    Dispatcher::builder(bot, schema::<E>())
        .dependencies(dptree::deps![engine])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build()
}
