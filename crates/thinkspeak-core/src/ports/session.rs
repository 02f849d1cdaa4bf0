//! Session authority port.

use async_trait::async_trait;

/// What a session token resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub is_admin: bool,
}

/// Maps opaque bearer tokens to sessions.
///
/// Sessions never expire on their own; they end on `revoke` or when the
/// backing store is dropped.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a session and return its token.
    async fn create(&self, user_id: i64, is_admin: bool) -> String;

    /// Look up a token. Unknown tokens resolve to `None`.
    async fn resolve(&self, token: &str) -> Option<Session>;

    /// End a session. Unknown tokens are ignored.
    async fn revoke(&self, token: &str);

    /// Number of live sessions.
    async fn active_count(&self) -> usize;
}
