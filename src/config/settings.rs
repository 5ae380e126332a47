//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Environment variable prefix, e.g. `EVENTBOT_BOT__ORGANISER_TOKEN`
pub const ENV_PREFIX: &str = "EVENTBOT";

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    pub images: ImageConfig,
    pub blast: BlastConfig,
    pub logging: LoggingConfig,
}

/// Telegram bot configuration for both bots
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    pub organiser_token: String,
    pub participant_token: String,
    /// Used to build `https://t.me/<username>?start=join_<id>` links
    pub participant_username: String,
    pub organiser_username: Option<String>,
}

/// Which document store implementation backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Image hosting and delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Base for durable file URLs, `<base>/bot<token>/<file_path>`
    pub file_base_url: String,
    /// Sent instead of an image that cannot be downloaded
    pub fallback_image_url: Option<String>,
    pub download_timeout_seconds: u64,
}

/// Blast message pacing
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlastConfig {
    pub messages_per_second: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_prefix: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file, still honouring environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path.as_ref()))
    }

    fn load<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::EventBotError> {
        super::validation::validate_settings(self)
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            organiser_token: String::new(),
            participant_token: String::new(),
            participant_username: String::new(),
            organiser_username: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            url: "postgresql://localhost/eventbot".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            file_base_url: "https://api.telegram.org/file".to_string(),
            fallback_image_url: None,
            download_timeout_seconds: 10,
        }
    }
}

impl Default for BlastConfig {
    fn default() -> Self {
        Self { messages_per_second: 20 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
            file_prefix: "eventbot.log".to_string(),
        }
    }
}
