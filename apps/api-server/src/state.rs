//! Application state - shared across all handlers.

use std::sync::Arc;

use thinkspeak_core::domain::NewUser;
use thinkspeak_core::error::RepoError;
use thinkspeak_core::ports::{
    AuthError, BlogStore, PasswordService, RateLimitError, RateLimiter, SessionStore,
};
use thinkspeak_infra::store::{SeedOptions, seed};
use thinkspeak_infra::{Argon2PasswordService, InMemorySessionStore, MemoryStore};

#[cfg(feature = "rate-limit")]
use thinkspeak_infra::InMemoryRateLimiter;

use crate::config::AppConfig;

/// Failures while building the state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Failed to hash the admin password: {0}")]
    Hashing(#[from] AuthError),

    #[error("Failed to seed the store: {0}")]
    Seed(#[from] RepoError),

    #[error(transparent)]
    RateLimit(#[from] RateLimitError),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub passwords: Arc<dyn PasswordService>,
    /// `None` disables throttling.
    pub rate_limiter: Option<Arc<dyn RateLimiter>>,
}

impl AppState {
    /// Build the in-memory store, seed it, and wire the services.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        let store = MemoryStore::new();
        seed(
            &store,
            SeedOptions {
                admin: NewUser {
                    username: config.admin.username.clone(),
                    email: config.admin.email.clone(),
                    password_hash: passwords.hash(&config.admin.password)?,
                    is_admin: true,
                },
                sample_data: config.seed_sample_data,
            },
        )
        .await?;

        #[cfg(feature = "rate-limit")]
        let rate_limiter: Option<Arc<dyn RateLimiter>> =
            Some(Arc::new(InMemoryRateLimiter::new(&config.rate_limit)?));

        #[cfg(not(feature = "rate-limit"))]
        let rate_limiter: Option<Arc<dyn RateLimiter>> = {
            tracing::info!("Running without rate-limit feature - requests are not throttled");
            None
        };

        tracing::info!(
            sample_data = config.seed_sample_data,
            rate_limited = rate_limiter.is_some(),
            "Application state initialized"
        );

        Ok(Self {
            store: Arc::new(store),
            sessions: Arc::new(InMemorySessionStore::new()),
            passwords,
            rate_limiter,
        })
    }
}
