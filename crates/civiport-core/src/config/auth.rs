//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token lifetime in minutes.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    /// Maximum failed login attempts before lockout.
    #[serde(default = "default_max_failed")]
    pub max_failed_attempts: u32,
    /// Account lockout duration in minutes.
    #[serde(default = "default_lockout")]
    pub lockout_duration_minutes: u64,
    /// Maximum failed second-factor attempts before a separate lockout.
    #[serde(default = "default_max_two_factor_failed")]
    pub two_factor_max_attempts: u32,
    /// Second-factor lockout duration in minutes.
    #[serde(default = "default_two_factor_lockout")]
    pub two_factor_lockout_minutes: u64,
    /// Roles for which a second factor is mandatory even when the account
    /// has not enabled it (lowercase role names).
    #[serde(default)]
    pub two_factor_required_roles: Vec<String>,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_minutes: default_session_ttl(),
            max_failed_attempts: default_max_failed(),
            lockout_duration_minutes: default_lockout(),
            two_factor_max_attempts: default_max_two_factor_failed(),
            two_factor_lockout_minutes: default_two_factor_lockout(),
            two_factor_required_roles: Vec::new(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    120
}

fn default_max_failed() -> u32 {
    5
}

fn default_lockout() -> u64 {
    30
}

fn default_max_two_factor_failed() -> u32 {
    3
}

fn default_two_factor_lockout() -> u64 {
    15
}

fn default_password_min() -> usize {
    8
}
