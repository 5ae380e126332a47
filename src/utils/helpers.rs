//! Helper functions and utilities
//!
//! Small pure functions shared by both conversation engines.

use chrono::{NaiveDate, Utc};
use rand::{distributions::Alphanumeric, Rng};
use uuid::Uuid;

/// Date format accepted from organisers and used when rendering events
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of repository-assigned document ids
pub const DOCUMENT_ID_LENGTH: usize = 20;

/// Deep-link payload prefix for `/start join_<eventID>`
pub const JOIN_PAYLOAD_PREFIX: &str = "join_";

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Generate a random alphanumeric document id
pub fn generate_document_id() -> String {
    generate_random_string(DOCUMENT_ID_LENGTH)
}

/// Generate a random alphanumeric string
pub fn generate_random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Today's calendar date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date, rejecting anything before `today`.
pub fn parse_event_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()?;
    if date < today {
        return None;
    }
    Some(date)
}

/// Format a date for display
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A check-in code is exactly four ASCII digits
pub fn is_valid_check_in_code(code: &str) -> bool {
    code.len() == 4 && code.chars().all(|c| c.is_ascii_digit())
}

/// Split a multi-select answer on commas, trimming each token.
///
/// Empty tokens between commas are kept.
pub fn split_multi_select(input: &str) -> Vec<String> {
    input.split(',').map(|token| token.trim().to_string()).collect()
}

/// Build the participant bot deep link for joining an event
pub fn join_deep_link(participant_username: &str, event_id: &str) -> String {
    format!(
        "https://t.me/{}?start={}{}",
        participant_username.trim_start_matches('@'),
        JOIN_PAYLOAD_PREFIX,
        event_id
    )
}

/// Extract the event id from a `join_<eventID>` payload
pub fn parse_join_payload(payload: &str) -> Option<&str> {
    payload
        .trim()
        .strip_prefix(JOIN_PAYLOAD_PREFIX)
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_document_id() {
        let id = generate_document_id();
        assert_eq!(id.len(), DOCUMENT_ID_LENGTH);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, generate_document_id());
    }

    #[test]
    fn test_parse_event_date() {
        let today = date(2025, 6, 1);
        assert_eq!(parse_event_date("2999-01-01", today), Some(date(2999, 1, 1)));
        assert_eq!(parse_event_date("2025-06-01", today), Some(today));
        assert_eq!(parse_event_date("2025-05-31", today), None);
        assert_eq!(parse_event_date("01-01-2999", today), None);
        assert_eq!(parse_event_date("tomorrow", today), None);
        assert_eq!(parse_event_date("2999-02-30", today), None);
    }

    #[test]
    fn test_split_multi_select() {
        assert_eq!(split_multi_select("A, B ,C"), vec!["A", "B", "C"]);
        assert_eq!(split_multi_select("A,,B"), vec!["A", "", "B"]);
        assert_eq!(split_multi_select("only"), vec!["only"]);
    }

    #[test]
    fn test_check_in_code_validation() {
        assert!(is_valid_check_in_code("0420"));
        assert!(!is_valid_check_in_code("420"));
        assert!(!is_valid_check_in_code("12345"));
        assert!(!is_valid_check_in_code("12a4"));
        assert!(!is_valid_check_in_code("１２３４"));
    }

    #[test]
    fn test_deep_link() {
        assert_eq!(
            join_deep_link("@EventParticipantBot", "abc123"),
            "https://t.me/EventParticipantBot?start=join_abc123"
        );
        assert_eq!(parse_join_payload("join_abc123"), Some("abc123"));
        assert_eq!(parse_join_payload("join_"), None);
        assert_eq!(parse_join_payload(""), None);
        assert_eq!(parse_join_payload("hello"), None);
    }

    proptest! {
        #[test]
        fn prop_split_preserves_token_count(tokens in proptest::collection::vec("[a-zA-Z0-9 ]{0,8}", 1..6)) {
            let input = tokens.join(",");
            let answers = split_multi_select(&input);
            prop_assert_eq!(answers.len(), tokens.len());
            for (answer, token) in answers.iter().zip(tokens.iter()) {
                prop_assert_eq!(answer.as_str(), token.trim());
            }
        }

        #[test]
        fn prop_four_digit_codes_are_valid(code in "[0-9]{4}") {
            prop_assert!(is_valid_check_in_code(&code));
        }

        #[test]
        fn prop_other_lengths_are_invalid(code in "[0-9]{0,3}|[0-9]{5,8}") {
            prop_assert!(!is_valid_check_in_code(&code));
        }

        #[test]
        fn prop_future_dates_accepted(offset in 0i64..20000) {
            let today = date(2025, 1, 1);
            let target = today + chrono::Duration::days(offset);
            let input = format_date(target);
            prop_assert_eq!(parse_event_date(&input, today), Some(target));
        }

        #[test]
        fn prop_past_dates_rejected(offset in 1i64..20000) {
            let today = date(2025, 1, 1);
            let target = today - chrono::Duration::days(offset);
            prop_assert_eq!(parse_event_date(&format_date(target), today), None);
        }
    }
}
