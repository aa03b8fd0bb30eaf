//! Storage boundary traits implemented by `civiport-database` and by
//! in-memory fakes in tests.

use async_trait::async_trait;
use uuid::Uuid;

use civiport_core::result::AppResult;

use crate::account::Account;
use crate::audit::AuditEvent;
use crate::permission::{NewGrant, PermissionGrant};

/// Read/write boundary for accounts, limited to what the security core
/// itself mutates (last login, backup-code consumption). Account
/// provisioning and role changes happen in administrative flows outside
/// this core.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Find an account by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find an account by email. Callers pass the already-normalized
    /// (lower-cased) form; the lookup is case-insensitive regardless.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Record a successful login by stamping `last_login_at`.
    async fn record_login(&self, id: Uuid) -> AppResult<()>;

    /// Replace the stored backup-code digest list. Used to persist the
    /// reduced list after a code is consumed.
    async fn replace_backup_codes(&self, id: Uuid, codes: &[String]) -> AppResult<()>;
}

/// Read/write boundary for per-account permission grants.
#[async_trait]
pub trait GrantRepository: Send + Sync + 'static {
    /// All active grants for an account. Expiry is evaluated by the
    /// resolver, not the store.
    async fn find_active_by_user(&self, user_id: Uuid) -> AppResult<Vec<PermissionGrant>>;

    /// Active grants for an account matching one permission code.
    async fn find_by_user_and_code(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> AppResult<Vec<PermissionGrant>>;

    /// Create a new grant.
    async fn create(&self, grant: &NewGrant) -> AppResult<PermissionGrant>;

    /// Soft-revoke a grant by flipping `active` to false. Returns `true`
    /// if a grant was updated. Grants are never hard-deleted.
    async fn deactivate(&self, grant_id: Uuid) -> AppResult<bool>;
}

/// Outbound boundary for structured security events. This core produces
/// events; it does not store or query them.
#[async_trait]
pub trait AuditSink: Send + Sync + 'static {
    /// Emit one audit event.
    async fn emit(&self, event: AuditEvent) -> AppResult<()>;
}
