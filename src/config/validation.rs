//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{EventBotError, Result};
use super::{Settings, StorageBackend};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_image_config(&settings.images)?;
    validate_blast_config(&settings.blast)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.organiser_token.is_empty() {
        return Err(EventBotError::Config(
            "Organiser bot token is required".to_string()
        ));
    }

    if config.participant_token.is_empty() {
        return Err(EventBotError::Config(
            "Participant bot token is required".to_string()
        ));
    }

    if config.organiser_token == config.participant_token {
        return Err(EventBotError::Config(
            "Organiser and participant bots must use different tokens".to_string()
        ));
    }

    if config.participant_username.trim_start_matches('@').is_empty() {
        return Err(EventBotError::Config(
            "Participant bot username is required for join links".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.backend == StorageBackend::Memory {
        return Ok(());
    }

    if config.url.is_empty() {
        return Err(EventBotError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(EventBotError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(EventBotError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate image configuration
fn validate_image_config(config: &super::ImageConfig) -> Result<()> {
    url::Url::parse(&config.file_base_url).map_err(|e| {
        EventBotError::Config(format!("Invalid image file base URL: {}", e))
    })?;

    if let Some(fallback) = &config.fallback_image_url {
        url::Url::parse(fallback).map_err(|e| {
            EventBotError::Config(format!("Invalid fallback image URL: {}", e))
        })?;
    }

    if config.download_timeout_seconds == 0 {
        return Err(EventBotError::Config(
            "Image download timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate blast configuration
fn validate_blast_config(config: &super::BlastConfig) -> Result<()> {
    if config.messages_per_second == 0 {
        return Err(EventBotError::Config(
            "Blast rate must be greater than 0 messages per second".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(EventBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(EventBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.file_prefix.is_empty() {
        return Err(EventBotError::Config(
            "Log file prefix is required".to_string()
        ));
    }

    Ok(())
}
