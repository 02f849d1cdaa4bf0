//! # Thinkspeak Infrastructure
//!
//! Concrete implementations of the ports defined in `thinkspeak-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store and sessions only
//! - `auth` - Argon2 password hashing
//! - `rate-limit` - Per-client rate limiting via governor

pub mod session;
pub mod store;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use session::InMemorySessionStore;
pub use store::MemoryStore;

#[cfg(feature = "auth")]
pub use auth::Argon2PasswordService;

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
