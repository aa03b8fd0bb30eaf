//! Session claims embedded in every signed token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use civiport_entity::account::Role;

/// Claims payload of a session token.
///
/// An immutable snapshot taken at issuance: identity, role, and the scope
/// attributes downstream authorization needs without a database
/// round-trip. Trusted for the token's full lifetime — a role change or
/// deactivation takes effect only after expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — the account ID.
    pub sub: Uuid,
    /// Account email at issuance.
    pub email: String,
    /// Account role at issuance.
    pub role: Role,
    /// Account active flag at issuance.
    pub active: bool,
    /// Email-verified flag at issuance.
    pub email_verified: bool,
    /// Sector responsibility, for complaint routing.
    pub sector: Option<String>,
    /// Establishments managed by this account.
    pub establishment_ids: Vec<Uuid>,
    /// Commune administered by this account, if any.
    pub commune_id: Option<Uuid>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token ID.
    pub jti: Uuid,
}

impl SessionClaims {
    /// Returns the account ID from the subject claim.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
