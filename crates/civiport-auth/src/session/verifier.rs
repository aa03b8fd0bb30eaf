//! Session token verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use civiport_core::config::auth::AuthConfig;

use super::claims::SessionClaims;

/// Why a token failed verification. Callers usually collapse both cases
/// into an unauthenticated response; the distinction matters for logging
/// and for clients that auto-renew on expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token's signature is valid but it has expired.
    #[error("Session has expired")]
    Expired,
    /// The token is malformed or its signature does not verify.
    #[error("Invalid session token")]
    Invalid,
}

/// Validates session tokens.
///
/// Verification checks signature integrity and expiry only — no store
/// lookup. Claims are trusted for the token's full lifetime.
#[derive(Clone)]
pub struct SessionVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl SessionVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token string.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::issuer::SessionIssuer;
    use chrono::Utc;
    use civiport_entity::account::{Account, Role};
    use uuid::Uuid;

    fn test_account() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "ana.pop@example.org".to_string(),
            password_hash: String::new(),
            display_name: Some("Ana Pop".to_string()),
            role: Role::Editor,
            active: true,
            email_verified: true,
            two_factor_secret: None,
            two_factor_enabled: false,
            backup_codes: Vec::new(),
            sector: Some("north".to_string()),
            establishment_ids: vec![Uuid::new_v4()],
            commune_id: None,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "unit-test-secret".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let config = config();
        let account = test_account();
        let session = SessionIssuer::new(&config).issue(&account).unwrap();

        let claims = SessionVerifier::new(&config).verify(&session.token).unwrap();
        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.role, Role::Editor);
        assert_eq!(claims.sector.as_deref(), Some("north"));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let config = config();
        let session = SessionIssuer::new(&config).issue(&test_account()).unwrap();

        let mut tampered = session.token.clone();
        tampered.pop();
        tampered.push('x');
        assert_eq!(
            SessionVerifier::new(&config).verify(&tampered),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let session = SessionIssuer::new(&config()).issue(&test_account()).unwrap();

        let other = AuthConfig {
            jwt_secret: "a-different-secret".to_string(),
            ..AuthConfig::default()
        };
        assert_eq!(
            SessionVerifier::new(&other).verify(&session.token),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_reissue_preserves_identity_and_expiry() {
        let config = config();
        let issuer = SessionIssuer::new(&config);
        let mut account = test_account();
        let original = issuer.issue(&account).unwrap();

        account.sector = Some("south".to_string());
        account.role = Role::Admin; // must NOT leak into the reissued claims
        let refreshed = issuer.reissue(&original.claims, &account).unwrap();

        assert_eq!(refreshed.claims.sub, original.claims.sub);
        assert_eq!(refreshed.claims.exp, original.claims.exp);
        assert_eq!(refreshed.claims.role, Role::Editor);
        assert_eq!(refreshed.claims.sector.as_deref(), Some("south"));
        assert_ne!(refreshed.claims.jti, original.claims.jti);
    }
}
