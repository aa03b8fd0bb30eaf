//! The credential authentication state machine.

use std::sync::Arc;

use tracing::{info, warn};

use civiport_core::config::auth::AuthConfig;
use civiport_core::traits::counter::CounterStore;
use civiport_entity::account::Account;
use civiport_entity::audit::{AuditAction, AuditEvent};
use civiport_entity::store::{AccountRepository, AuditSink};

use crate::error::AuthError;
use crate::password::PasswordHasher;
use crate::session::{SessionClaims, SessionIssuer, SignedSession};
use crate::throttle::AttemptTracker;
use crate::twofactor::{TotpVerifier, backup};

/// Key prefix for the password failure tracker.
const LOGIN_TRACKER_PREFIX: &str = "login";
/// Key prefix for the second-factor failure tracker.
const TWO_FACTOR_TRACKER_PREFIX: &str = "2fa";

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthSuccess {
    /// The issued session token and its claims.
    pub session: SignedSession,
    /// The authenticated account.
    pub account: Account,
}

/// Orchestrates password verification, lockout checks, and the optional
/// second factor.
///
/// Terminal outcomes are the [`AuthError`] kinds plus issuance; every
/// branch ends in exactly one of them. Infrastructure failures are logged
/// and collapsed to [`AuthError::ServiceUnavailable`] by the `From`
/// conversion, so no internal detail reaches the caller.
#[derive(Clone)]
pub struct Authenticator {
    /// Account storage.
    accounts: Arc<dyn AccountRepository>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// TOTP verifier (30-second step, one step of tolerance).
    totp: TotpVerifier,
    /// Password failure tracker.
    login_tracker: AttemptTracker,
    /// Second-factor failure tracker, independent of the password tracker.
    two_factor_tracker: AttemptTracker,
    /// Session token issuer.
    issuer: Arc<SessionIssuer>,
    /// Audit event sink.
    audit: Arc<dyn AuditSink>,
    /// Roles for which a second factor is mandatory.
    two_factor_required_roles: Vec<String>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("two_factor_required_roles", &self.two_factor_required_roles)
            .finish()
    }
}

impl Authenticator {
    /// Creates an authenticator with both trackers built over the given
    /// counter store, thresholds and windows taken from configuration.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        counter_store: Arc<dyn CounterStore>,
        issuer: Arc<SessionIssuer>,
        audit: Arc<dyn AuditSink>,
        config: &AuthConfig,
    ) -> Self {
        let login_tracker = AttemptTracker::new(
            Arc::clone(&counter_store),
            LOGIN_TRACKER_PREFIX,
            config.max_failed_attempts,
            config.lockout_duration_minutes,
        );
        let two_factor_tracker = AttemptTracker::new(
            counter_store,
            TWO_FACTOR_TRACKER_PREFIX,
            config.two_factor_max_attempts,
            config.two_factor_lockout_minutes,
        );

        Self {
            accounts,
            hasher: PasswordHasher::new(),
            totp: TotpVerifier::new(),
            login_tracker,
            two_factor_tracker,
            issuer,
            audit,
            two_factor_required_roles: config.two_factor_required_roles.clone(),
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Normalize the email and look up the account
    /// 2. Unknown account: burn a hash verification, generic failure
    /// 3. Disabled account: refuse regardless of lockout/password state
    /// 4. Refuse while the lockout window is open, before any hashing
    /// 5. Verify the password; count failures toward lockout
    /// 6. Require the second factor when enabled or mandated by role
    /// 7. Verify TOTP, falling back to single-use backup codes
    /// 8. Reset both trackers, stamp last login, audit, issue the token
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
        totp_code: Option<&str>,
    ) -> Result<AuthSuccess, AuthError> {
        let email = normalize_email(email);

        // Step 1: Find account
        let Some(mut account) = self.accounts.find_by_email(&email).await? else {
            // Step 2: Equalize response time with the known-account path so
            // the response latency does not reveal whether the email exists.
            self.hasher.burn_verification(password);
            self.audit_event(
                AuditEvent::now(None, Some(email.clone()), AuditAction::LoginFailed)
                    .with_details(serde_json::json!({ "reason": "unknown_account" })),
            )
            .await;
            return Err(AuthError::InvalidCredentials {
                remaining_attempts: None,
            });
        };

        // Step 3: Disabled accounts fail before lockout or password state.
        if !account.active {
            self.audit_event(
                AuditEvent::now(Some(account.id), Some(email.clone()), AuditAction::LoginFailed)
                    .with_details(serde_json::json!({ "reason": "disabled" })),
            )
            .await;
            return Err(AuthError::AccountDisabled);
        }

        // Step 4: Lockout gate. No password comparison while blocked.
        let block = self.login_tracker.check_blocked(&email).await?;
        if block.blocked {
            return Err(AuthError::AccountLocked {
                remaining_minutes: block.remaining_minutes,
            });
        }

        // Step 5: Verify password
        let password_valid = self
            .hasher
            .verify_password(password, &account.password_hash)?;

        if !password_valid {
            return Err(self.handle_password_failure(&account, &email).await?);
        }

        // Step 6: Second factor
        if self.second_factor_required(&account) {
            let Some(code) = totp_code else {
                return Err(AuthError::TwoFactorRequired);
            };
            self.verify_second_factor(&mut account, &email, code).await?;
        }

        // Step 8: Success
        self.login_tracker.reset(&email).await?;
        self.two_factor_tracker.reset(&email).await?;
        self.accounts.record_login(account.id).await?;

        self.audit_event(AuditEvent::now(
            Some(account.id),
            Some(email.clone()),
            AuditAction::LoginSucceeded,
        ))
        .await;
        info!(account_id = %account.id, "Login succeeded");

        let session = self.issuer.issue(&account)?;
        Ok(AuthSuccess { session, account })
    }

    /// Records a sign-out. Tokens cannot be revoked server-side; this only
    /// emits the audit event for the action.
    pub async fn sign_out(&self, claims: &SessionClaims) {
        self.audit_event(AuditEvent::now(
            Some(claims.sub),
            Some(claims.email.clone()),
            AuditAction::SignedOut,
        ))
        .await;
    }

    /// A second factor is required when the account enabled it or policy
    /// mandates it for the account's role.
    fn second_factor_required(&self, account: &Account) -> bool {
        account.two_factor_enabled
            || self
                .two_factor_required_roles
                .iter()
                .any(|role| role == account.role.as_str())
    }

    /// Counts a password failure; crossing the threshold locks the account.
    async fn handle_password_failure(
        &self,
        account: &Account,
        email: &str,
    ) -> Result<AuthError, AuthError> {
        let outcome = self.login_tracker.record_failure(email).await?;

        if outcome.blocked {
            self.audit_event(
                AuditEvent::now(
                    Some(account.id),
                    Some(email.to_string()),
                    AuditAction::AccountLocked,
                )
                .with_details(serde_json::json!({
                    "lockout_minutes": outcome.lockout_minutes,
                })),
            )
            .await;
            warn!(account_id = %account.id, "Account locked after repeated password failures");
            return Ok(AuthError::AccountLocked {
                remaining_minutes: outcome.lockout_minutes as i64,
            });
        }

        self.audit_event(
            AuditEvent::now(
                Some(account.id),
                Some(email.to_string()),
                AuditAction::LoginFailed,
            )
            .with_details(serde_json::json!({
                "reason": "wrong_password",
                "remaining_attempts": outcome.remaining_attempts,
            })),
        )
        .await;
        Ok(AuthError::InvalidCredentials {
            remaining_attempts: Some(outcome.remaining_attempts),
        })
    }

    /// Verifies the supplied code as a TOTP, then against the backup-code
    /// list. A backup-code match is single-use: the reduced digest list is
    /// persisted before the login proceeds.
    async fn verify_second_factor(
        &self,
        account: &mut Account,
        email: &str,
        code: &str,
    ) -> Result<(), AuthError> {
        let block = self.two_factor_tracker.check_blocked(email).await?;
        if block.blocked {
            return Err(AuthError::TwoFactorLocked {
                remaining_minutes: block.remaining_minutes,
            });
        }

        if let Some(secret) = &account.two_factor_secret {
            if self.totp.verify(secret, code)? {
                return Ok(());
            }
        }

        if let Some(index) = backup::find_match(&account.backup_codes, code) {
            account.backup_codes.remove(index);
            self.accounts
                .replace_backup_codes(account.id, &account.backup_codes)
                .await?;
            self.audit_event(
                AuditEvent::now(
                    Some(account.id),
                    Some(email.to_string()),
                    AuditAction::BackupCodeUsed,
                )
                .with_details(serde_json::json!({
                    "remaining_codes": account.backup_codes.len(),
                })),
            )
            .await;
            return Ok(());
        }

        let outcome = self.two_factor_tracker.record_failure(email).await?;
        self.audit_event(AuditEvent::now(
            Some(account.id),
            Some(email.to_string()),
            AuditAction::TwoFactorFailed,
        ))
        .await;

        if outcome.blocked {
            Err(AuthError::TwoFactorLocked {
                remaining_minutes: outcome.lockout_minutes as i64,
            })
        } else {
            Err(AuthError::TwoFactorInvalid {
                remaining_attempts: outcome.remaining_attempts,
            })
        }
    }

    /// Audit emission must never fail a login; sink errors are logged.
    async fn audit_event(&self, event: AuditEvent) {
        if let Err(e) = self.audit.emit(event).await {
            warn!(error = %e, "Failed to emit audit event");
        }
    }
}

/// Lower-cases and trims an email for lookup and tracker keying.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
