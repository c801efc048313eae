//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use catalog_core::error::AppError;

/// Hashes and verifies user passwords with Argon2id.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a hasher with the default Argon2id parameters.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password with a random salt into PHC string form.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Checks a plaintext password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`. An unreadable stored hash is an error.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Stored password hash is invalid: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("password123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("password123", &hash).unwrap());
        assert!(!hasher.verify_password("password124", &hash).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_error() {
        assert!(PasswordHasher::new().verify_password("x", "not-a-hash").is_err());
    }
}
