//! Mock Telegram API server for testing
//!
//! Simulates the few Bot API methods EventBot calls directly, plus plain
//! file hosting for image downloads.

use serde_json::{json, Value};
use teloxide::Bot;
use url::Url;
use wiremock::{
    matchers::{method, path, path_regex},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_TOKEN: &str = "123456:TEST-TOKEN";

pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// A bot whose API calls go to this server
    pub fn bot(&self) -> Bot {
        Bot::new(TEST_TOKEN).set_api_url(Url::parse(&self.uri()).unwrap())
    }

    /// teloxide spells method names in PascalCase, match case-insensitively
    fn api_method(name: &str) -> wiremock::matchers::PathRegexMatcher {
        path_regex(format!("(?i)^/bot[^/]+/{}$", name))
    }

    pub async fn mock_send_message(&self, chat_id: i64) {
        Mock::given(method("POST"))
            .and(Self::api_method("sendmessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": message_json(chat_id, json!({"text": "ok"})),
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_send_message_error(&self, description: &str) {
        Mock::given(method("POST"))
            .and(Self::api_method("sendmessage"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": description,
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_get_file(&self, file_path: &str) {
        Mock::given(method("POST"))
            .and(Self::api_method("getfile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {
                    "file_id": "photo-file-id",
                    "file_unique_id": "photo-unique-id",
                    "file_size": 2048,
                    "file_path": file_path,
                }
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_get_file_error(&self) {
        Mock::given(method("POST"))
            .and(Self::api_method("getfile"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: invalid file_id",
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve `body` as an image at `image_path`
    pub async fn mock_image(&self, image_path: &str, body: &[u8]) {
        Mock::given(method("GET"))
            .and(path(image_path))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_missing_image(&self, image_path: &str) {
        Mock::given(method("GET"))
            .and(path(image_path))
            .respond_with(ResponseTemplate::new(404))
            .mount(&self.server)
            .await;
    }

    /// JSON bodies of every request received so far
    pub async fn request_bodies(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|request| serde_json::from_slice(&request.body).ok())
            .collect()
    }
}

fn message_json(chat_id: i64, extra: Value) -> Value {
    let mut message = json!({
        "message_id": 1,
        "date": 1735689600,
        "chat": {"id": chat_id, "type": "private", "first_name": "Test"},
        "from": {"id": 777, "is_bot": true, "first_name": "EventBot", "username": "event_bot"},
    });
    if let (Some(target), Value::Object(fields)) = (message.as_object_mut(), extra) {
        target.extend(fields);
    }
    message
}
