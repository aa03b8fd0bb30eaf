//! Business-rule error types for authentication and authorization.
//!
//! These are safe to disclose to callers verbatim and form part of the
//! login UX (remaining attempts, lockout minutes). Infrastructure failures
//! are never surfaced through them: any [`AppError`] reaching the
//! authenticator is logged with full detail and collapsed into the generic
//! [`AuthError::ServiceUnavailable`].

use thiserror::Error;
use tracing::error;

use civiport_core::error::AppError;

/// Authentication failure kinds returned by the credential authenticator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Unknown email or wrong password. `remaining_attempts` is present
    /// only when the account exists and the lockout threshold has not yet
    /// been crossed.
    #[error("Invalid email or password")]
    InvalidCredentials {
        /// Attempts left before lockout, when known.
        remaining_attempts: Option<u32>,
    },
    /// Too many failed password attempts.
    #[error("Account is temporarily locked. Try again in {remaining_minutes} minutes")]
    AccountLocked {
        /// Minutes until the lockout window ends.
        remaining_minutes: i64,
    },
    /// The account's active flag is false.
    #[error("This account has been disabled")]
    AccountDisabled,
    /// A second factor is required and no code was supplied.
    #[error("A verification code is required")]
    TwoFactorRequired,
    /// The supplied code matched neither the TOTP nor any backup code.
    #[error("Invalid verification code")]
    TwoFactorInvalid {
        /// Second-factor attempts left before lockout.
        remaining_attempts: u32,
    },
    /// Too many failed second-factor attempts.
    #[error("Too many failed verification attempts. Try again in {remaining_minutes} minutes")]
    TwoFactorLocked {
        /// Minutes until the second-factor lockout ends.
        remaining_minutes: i64,
    },
    /// Generic replacement for any infrastructure failure. Carries no
    /// internal detail; the underlying cause is logged before conversion.
    #[error("Service temporarily unavailable. Please try again later")]
    ServiceUnavailable,
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        error!(kind = %err.kind, error = %err, "Infrastructure failure during authentication");
        Self::ServiceUnavailable
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::ServiceUnavailable => AppError::service_unavailable(err.to_string()),
            _ => AppError::authentication(err.to_string()),
        }
    }
}

/// Authorization failure kinds returned by the guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No valid session is present.
    #[error("Authentication required")]
    Unauthenticated,
    /// The session is valid but the role/permissions do not allow the action.
    #[error("You do not have permission to perform this action")]
    Forbidden,
}

impl From<AccessError> for AppError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unauthenticated => AppError::authentication(err.to_string()),
            AccessError::Forbidden => AppError::authorization(err.to_string()),
        }
    }
}
