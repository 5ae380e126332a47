//! Environment overrides for settings

use serial_test::serial;
use std::env;
use EventBot::config::StorageBackend;
use EventBot::Settings;

const VARS: [(&str, &str); 5] = [
    ("EVENTBOT_BOT__ORGANISER_TOKEN", "111:organiser"),
    ("EVENTBOT_BOT__PARTICIPANT_TOKEN", "222:participant"),
    ("EVENTBOT_BOT__PARTICIPANT_USERNAME", "EventPartBot"),
    ("EVENTBOT_BLAST__MESSAGES_PER_SECOND", "5"),
    ("EVENTBOT_DATABASE__BACKEND", "memory"),
];

fn clear() {
    for (key, _) in VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_environment_overrides() {
    for (key, value) in VARS {
        env::set_var(key, value);
    }

    let settings = Settings::new().unwrap();
    clear();

    assert_eq!(settings.bot.organiser_token, "111:organiser");
    assert_eq!(settings.bot.participant_token, "222:participant");
    assert_eq!(settings.bot.participant_username, "EventPartBot");
    assert_eq!(settings.blast.messages_per_second, 5);
    assert_eq!(settings.database.backend, StorageBackend::Memory);
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_missing_tokens_fail_validation() {
    clear();
    let settings = Settings::new().unwrap();
    assert!(settings.validate().is_err());
}
