//! Security audit event model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of security-relevant action an audit event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A login attempt succeeded.
    LoginSucceeded,
    /// A login attempt failed (wrong password, unknown account, disabled).
    LoginFailed,
    /// An account crossed the failure threshold and was locked out.
    AccountLocked,
    /// A second-factor verification failed.
    TwoFactorFailed,
    /// A backup code was consumed.
    BackupCodeUsed,
    /// A session was signed out.
    SignedOut,
    /// An upload was rejected by the validation pipeline.
    UploadRejected,
}

impl AuditAction {
    /// Return the action as a dotted event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginSucceeded => "auth.login_succeeded",
            Self::LoginFailed => "auth.login_failed",
            Self::AccountLocked => "auth.account_locked",
            Self::TwoFactorFailed => "auth.two_factor_failed",
            Self::BackupCodeUsed => "auth.backup_code_used",
            Self::SignedOut => "auth.signed_out",
            Self::UploadRejected => "upload.rejected",
        }
    }
}

/// A structured security event emitted to the audit boundary.
///
/// This core only produces events; storing and querying them is the
/// responsibility of the external logging collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The account the event concerns, when known.
    pub actor_id: Option<Uuid>,
    /// The email the event concerns, lower-cased, when known.
    pub email: Option<String>,
    /// The action that occurred.
    pub action: AuditAction,
    /// Additional details about the action (JSON).
    pub details: Option<serde_json::Value>,
    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Create an event stamped with the current time.
    pub fn now(actor_id: Option<Uuid>, email: Option<String>, action: AuditAction) -> Self {
        Self {
            actor_id,
            email,
            action,
            details: None,
            occurred_at: Utc::now(),
        }
    }

    /// Attach a JSON details payload.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
