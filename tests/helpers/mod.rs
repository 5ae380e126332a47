//! Test helpers module
//!
//! Recording gateways, fake image hosting and engine fixtures over the
//! in-memory document store.

#![allow(dead_code)]

pub mod recording_gateway;
pub mod telegram_mock;
pub mod test_context;

pub use recording_gateway::*;
pub use telegram_mock::*;
pub use test_context::*;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}
