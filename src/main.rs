//! EventBot Telegram bots
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::info;

use EventBot::{
    config::Settings,
    database::{open_document_store, DatabaseService},
    handlers::{
        commands::{OrganiserCommand, ParticipantCommand},
        dispatch::build_dispatcher,
        OrganiserBot, ParticipantBot,
    },
    services::{ImageDelivery, NotificationService, TelegramGateway, TelegramImageHost},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load settings")?;
    settings.validate().context("invalid settings")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", EventBot::info());

    let store = open_document_store(&settings.database)
        .await
        .context("failed to open document store")?;
    let db = DatabaseService::new(store);

    let organiser_bot = Bot::new(&settings.bot.organiser_token);
    let participant_bot = Bot::new(&settings.bot.participant_token);

    let organiser_gateway = Arc::new(TelegramGateway::new(organiser_bot.clone()));
    let participant_gateway = Arc::new(TelegramGateway::new(participant_bot.clone()));

    let organiser_name = match &settings.bot.organiser_username {
        Some(name) => name.trim_start_matches('@').to_string(),
        None => organiser_bot
            .get_me()
            .await
            .context("failed to fetch organiser bot profile")?
            .user
            .username
            .clone()
            .unwrap_or_default(),
    };
    let participant_name = settings.bot.participant_username.trim_start_matches('@').to_string();

    let organiser = Arc::new(
        OrganiserBot::new(
            db.clone(),
            organiser_gateway,
            Arc::new(TelegramImageHost::new(organiser_bot.clone(), settings.images.file_base_url.clone())),
            NotificationService::new(participant_gateway.clone(), settings.blast.messages_per_second),
            participant_name.clone(),
        )
        .with_bot_name(organiser_name),
    );
    let participant = Arc::new(
        ParticipantBot::new(db, participant_gateway, ImageDelivery::new(&settings.images)?)
            .with_bot_name(participant_name),
    );

    if let Err(e) = organiser_bot.set_my_commands(OrganiserCommand::bot_commands()).await {
        logging::log_api_error("setMyCommands", &e.to_string(), Some("organiser"));
    }
    if let Err(e) = participant_bot.set_my_commands(ParticipantCommand::bot_commands()).await {
        logging::log_api_error("setMyCommands", &e.to_string(), Some("participant"));
    }

    let mut organiser_dispatcher = build_dispatcher(organiser_bot, organiser);
    let mut participant_dispatcher = build_dispatcher(participant_bot, participant);

    info!("EventBot is ready, starting polling");
    tokio::join!(organiser_dispatcher.dispatch(), participant_dispatcher.dispatch());

    info!("EventBot has been shut down.");
    Ok(())
}
