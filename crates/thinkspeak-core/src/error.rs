//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures detected before touching storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unknown {kind} status: {value}")]
    UnknownStatus { kind: &'static str, value: String },
}

/// Repository-level errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl RepoError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}
