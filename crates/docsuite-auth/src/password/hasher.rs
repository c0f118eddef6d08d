//! Credential hashing. Argon2id, one random salt per hash.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};

use docsuite_core::error::AppError;

/// Stateless wrapper around Argon2id with default parameters. A struct
/// rather than free functions so services can hold it behind `Arc` like
/// every other injected dependency.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("password hashing failed: {e}")))
    }

    /// `Ok(false)` means the password simply didn't match; anything else
    /// wrong with the stored hash is an error.
    pub fn verify_password(&self, password: &str, stored: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AppError::internal(format!("stored hash is not parseable: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_the_original_and_rejects_others() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("s3cret-passphrase").unwrap();
        assert!(hasher.verify_password("s3cret-passphrase", &hash).unwrap());
        assert!(!hasher.verify_password("other", &hash).unwrap());
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hasher = PasswordHasher::new();
        let a = hasher.hash_password("same input").unwrap();
        let b = hasher.hash_password("same input").unwrap();
        assert_ne!(a, b);
    }
}
