//! Admin API. Every handler takes an `AdminIdentity`.

pub mod categories;
pub mod comments;
pub mod posts;
pub mod stats;
pub mod tags;

use thinkspeak_shared::MessageResponse;

fn deleted(entity: &str) -> MessageResponse {
    MessageResponse::new(format!("{entity} deleted successfully"))
}
