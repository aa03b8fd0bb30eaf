//! Password policy enforcement for new passwords.

use civiport_core::config::auth::AuthConfig;
use civiport_core::error::AppError;

/// Validates password strength against configured policies.
///
/// Used by the account-management boundary that provisions credentials;
/// the authenticator itself never calls this.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::validation(
                "Password must contain at least one uppercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::validation(
                "Password must contain at least one lowercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        if !password.chars().any(|c| !c.is_alphanumeric()) {
            return Err(AppError::validation(
                "Password must contain at least one special character",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_accepts_compliant_password() {
        assert!(validator().validate("Str0ng.Enough").is_ok());
    }

    #[test]
    fn test_rejects_short_password() {
        assert!(validator().validate("A1.b").is_err());
    }

    #[test]
    fn test_rejects_missing_character_classes() {
        assert!(validator().validate("alllowercase1!").is_err());
        assert!(validator().validate("ALLUPPERCASE1!").is_err());
        assert!(validator().validate("NoDigits.Here").is_err());
        assert!(validator().validate("NoSpecials123").is_err());
    }
}
