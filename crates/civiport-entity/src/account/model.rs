//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::Role;

/// A registered account in the CiviPort system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: Uuid,
    /// Email address, stored lower-cased, unique.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Human-readable display name.
    pub display_name: Option<String>,
    /// Account role (RBAC).
    pub role: Role,
    /// Whether the account may authenticate at all.
    pub active: bool,
    /// Whether the email address has been verified.
    pub email_verified: bool,
    /// Base32-encoded TOTP secret, present once the account enrolled.
    #[serde(skip_serializing)]
    pub two_factor_secret: Option<String>,
    /// Whether the second factor is enabled for this account.
    pub two_factor_enabled: bool,
    /// SHA-256 hex digests of unused backup codes.
    #[serde(skip_serializing)]
    pub backup_codes: Vec<String>,
    /// Sector this account is responsible for (complaint routing).
    pub sector: Option<String>,
    /// Establishments this account manages.
    pub establishment_ids: Vec<Uuid>,
    /// Commune this account administers, if any.
    pub commune_id: Option<Uuid>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Check if this account has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check whether the account has an enrolled TOTP secret.
    pub fn has_two_factor_secret(&self) -> bool {
        self.two_factor_secret.is_some()
    }
}
