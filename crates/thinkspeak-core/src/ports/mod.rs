//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod rate_limit;
mod repository;
mod session;

pub use auth::{AuthError, PasswordService};
pub use rate_limit::{RateLimitError, RateLimitResult, RateLimiter};
pub use repository::{
    BlogStore, CategoryRepository, CommentRepository, PostRepository, TagRepository,
    UserRepository,
};
pub use session::{Session, SessionStore};
