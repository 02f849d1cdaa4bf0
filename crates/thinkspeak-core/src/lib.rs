//! # Thinkspeak Core
//!
//! The domain layer of the Thinkspeak blog.
//! Entities, joined read views, and the port traits that storage, session and
//! auth adapters implement. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
