//! Notification service implementation
//!
//! Sends one message to many chats through a single gateway, paced so a
//! large blast stays under the Bot API flood limits.

use std::num::NonZeroU32;
use std::sync::Arc;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use tracing::{info, warn};
use crate::services::gateway::{Markup, MessagingGateway};

/// Outcome of a bulk send
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkReport {
    pub sent: usize,
    pub failed: usize,
}

pub struct NotificationService {
    gateway: Arc<dyn MessagingGateway>,
    limiter: DefaultDirectRateLimiter,
}

impl NotificationService {
    /// Create a service sending at most `messages_per_second` messages
    pub fn new(gateway: Arc<dyn MessagingGateway>, messages_per_second: u32) -> Self {
        let rate = NonZeroU32::new(messages_per_second).unwrap_or(NonZeroU32::MIN);
        Self {
            gateway,
            limiter: RateLimiter::direct(Quota::per_second(rate)),
        }
    }

    /// Send `text` to every chat in order. Failures are counted, never retried.
    pub async fn send_bulk(&self, chat_ids: &[i64], text: &str) -> BulkReport {
        info!(count = chat_ids.len(), "Sending bulk notification");
        let mut report = BulkReport::default();

        for &chat_id in chat_ids {
            self.limiter.until_ready().await;
            match self.gateway.send_text(chat_id, text, Markup::None).await {
                Ok(()) => report.sent += 1,
                Err(e) => {
                    warn!(chat_id = chat_id, error = %e, "Failed to deliver bulk notification");
                    report.failed += 1;
                }
            }
        }

        info!(sent = report.sent, failed = report.failed, "Bulk notification finished");
        report
    }
}
