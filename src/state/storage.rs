//! Session storage implementation
//!
//! Conversation state lives in process memory, one entry per Telegram user.
//! Entries are created on first contact and never evicted.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Per-user session map.
///
/// Holding the guard returned by [`SessionStore::acquire`] serialises all
/// handling for that user while other users proceed independently.
pub struct SessionStore<S> {
    sessions: Mutex<HashMap<i64, Arc<Mutex<S>>>>,
}

impl<S: Default + Send + 'static> SessionStore<S> {
    pub fn new() -> Self {
        Self { sessions: Mutex::new(HashMap::new()) }
    }

    /// Lock the session of `user_id`, creating an idle one if needed
    pub async fn acquire(&self, user_id: i64) -> OwnedMutexGuard<S> {
        let session = {
            let mut sessions = self.sessions.lock().await;
            sessions
                .entry(user_id)
                .or_insert_with(|| {
                    debug!(user_id = user_id, "Creating session");
                    Arc::new(Mutex::new(S::default()))
                })
                .clone()
        };
        session.lock_owned().await
    }

    /// Number of users seen since start-up
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<S: Default + Send + 'static> Default for SessionStore<S> {
    fn default() -> Self {
        Self::new()
    }
}
