//! Per-account permission grant entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An explicit permission grant for a single account.
///
/// Grants only ever add permissions on top of the role defaults; there is
/// no negative grant. Revocation flips `active` to false, never deletes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PermissionGrant {
    /// Unique grant identifier.
    pub id: Uuid,
    /// The account this grant applies to.
    pub user_id: Uuid,
    /// The granted permission code (snake_case text).
    pub permission_code: String,
    /// Whether the grant is currently active. Soft-revoked grants stay in
    /// the table with `active = false`.
    pub active: bool,
    /// Optional expiry; the grant stops counting after this time without
    /// being deactivated.
    pub expires_at: Option<DateTime<Utc>>,
    /// The administrator who created the grant.
    pub granted_by: Uuid,
    /// When the grant was created.
    pub granted_at: DateTime<Utc>,
}

impl PermissionGrant {
    /// A grant counts toward the effective permission set iff it is active
    /// and either unbounded or not yet expired.
    pub fn is_effective(&self, now: DateTime<Utc>) -> bool {
        self.active && self.expires_at.is_none_or(|expiry| expiry > now)
    }
}

/// Data required to create a new grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGrant {
    /// The account to grant to.
    pub user_id: Uuid,
    /// The permission code being granted.
    pub permission_code: String,
    /// Optional expiry timestamp.
    pub expires_at: Option<DateTime<Utc>>,
    /// The granting administrator.
    pub granted_by: Uuid,
}
