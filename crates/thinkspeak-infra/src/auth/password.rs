//! Argon2id password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use thinkspeak_core::ports::{AuthError, PasswordService};

/// Argon2-based password service producing PHC strings.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(hash).map_err(|e| {
            tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
            AuthError::HashingError(e.to_string())
        })?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();

        let hash = service.hash("admin123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(service.verify("admin123", &hash).unwrap());
        assert!(!service.verify("admin124", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let service = Argon2PasswordService::new();
        assert_ne!(service.hash("same").unwrap(), service.hash("same").unwrap());
    }

    #[test]
    fn test_plaintext_stored_value_is_an_error() {
        let service = Argon2PasswordService::new();
        assert!(matches!(
            service.verify("admin123", "admin123"),
            Err(AuthError::HashingError(_))
        ));
    }
}
