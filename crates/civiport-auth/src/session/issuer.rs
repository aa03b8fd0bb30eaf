//! Session token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use civiport_core::config::auth::AuthConfig;
use civiport_core::error::AppError;
use civiport_entity::account::Account;

use super::claims::SessionClaims;

/// Result of a successful token issuance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SignedSession {
    /// The signed bearer token.
    pub token: String,
    /// The claims embedded in the token.
    pub claims: SessionClaims,
}

/// Creates signed session tokens (HS256).
#[derive(Clone)]
pub struct SessionIssuer {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Session TTL in minutes.
    ttl_minutes: i64,
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}

impl SessionIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: config.session_ttl_minutes as i64,
        }
    }

    /// Issues a token for the account's current identity, role, and scope.
    pub fn issue(&self, account: &Account) -> Result<SignedSession, AppError> {
        let now = Utc::now();
        let exp = now + chrono::Duration::minutes(self.ttl_minutes);

        let claims = SessionClaims {
            sub: account.id,
            email: account.email.clone(),
            role: account.role,
            active: account.active,
            email_verified: account.email_verified,
            sector: account.sector.clone(),
            establishment_ids: account.establishment_ids.clone(),
            commune_id: account.commune_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        self.sign(claims)
    }

    /// Re-issues a live session with refreshed profile and scope
    /// attributes, without full re-authentication.
    ///
    /// Identity, role, and the original expiry are preserved — a reissue
    /// must never extend the session's lifetime or escalate its role.
    pub fn reissue(
        &self,
        current: &SessionClaims,
        account: &Account,
    ) -> Result<SignedSession, AppError> {
        let claims = SessionClaims {
            sub: current.sub,
            email: account.email.clone(),
            role: current.role,
            active: current.active,
            email_verified: account.email_verified,
            sector: account.sector.clone(),
            establishment_ids: account.establishment_ids.clone(),
            commune_id: account.commune_id,
            iat: current.iat,
            exp: current.exp,
            jti: Uuid::new_v4(),
        };

        self.sign(claims)
    }

    fn sign(&self, claims: SessionClaims) -> Result<SignedSession, AppError> {
        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))?;

        Ok(SignedSession { token, claims })
    }
}
