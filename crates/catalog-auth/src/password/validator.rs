//! Password policy for registration and password changes.

use catalog_core::config::AuthConfig;
use catalog_core::error::AppError;

/// Enforces the configured password policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Checks a new password against the policy.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank"));
        }
        Ok(())
    }

    /// Checks that a confirmation field matches.
    pub fn validate_confirmation(&self, password: &str, confirmation: &str) -> Result<(), AppError> {
        if password != confirmation {
            return Err(AppError::validation("Passwords do not match"));
        }
        Ok(())
    }

    /// Checks that a new password differs from the current one.
    pub fn validate_not_same(&self, current: &str, new: &str) -> Result<(), AppError> {
        if current == new {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_length() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate("12345").is_err());
        assert!(validator.validate("123456").is_ok());
        assert!(validator.validate("      ").is_err());
    }

    #[test]
    fn test_confirmation_and_reuse() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        assert!(validator.validate_confirmation("abcdef", "abcdeg").is_err());
        assert!(validator.validate_not_same("abcdef", "abcdef").is_err());
        assert!(validator.validate_not_same("abcdef", "ghijkl").is_ok());
    }
}
