//! # Thinkspeak Shared
//!
//! Request and response shapes of the HTTP API, with their validation rules.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldError, MessageResponse};
