//! In-memory session store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use thinkspeak_core::ports::{Session, SessionStore};

/// Session map behind an async RwLock.
///
/// Tokens are 128-bit random hex strings with no expiry.
/// Note: every session is lost on process restart.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn generate_token() -> String {
        Uuid::new_v4().simple().to_string()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: i64, is_admin: bool) -> String {
        let token = Self::generate_token();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), Session { user_id, is_admin });
        tracing::debug!(user_id, is_admin, active = sessions.len(), "Session opened");
        token
    }

    async fn resolve(&self, token: &str) -> Option<Session> {
        self.sessions.read().await.get(token).copied()
    }

    async fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.remove(token) {
            tracing::debug!(user_id = session.user_id, "Session revoked");
        }
    }

    async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
