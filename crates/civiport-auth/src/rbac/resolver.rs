//! Permission resolution: bypass tier, explicit grants, role defaults.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use civiport_core::result::AppResult;
use civiport_entity::permission::PermissionCode;
use civiport_entity::store::{AccountRepository, GrantRepository};

use super::defaults::RoleDefaults;

/// Answers "may account U perform action A".
///
/// Resolution order is fixed: admin bypass, then an effective explicit
/// grant, then the role's static defaults. Explicit grants only add
/// permissions — revocation happens by deactivating the grant, never by a
/// negative grant.
#[derive(Clone)]
pub struct PermissionResolver {
    /// Account lookup for role resolution.
    accounts: Arc<dyn AccountRepository>,
    /// Grant store.
    grants: Arc<dyn GrantRepository>,
    /// Static role defaults.
    defaults: RoleDefaults,
}

impl std::fmt::Debug for PermissionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionResolver").finish()
    }
}

impl PermissionResolver {
    /// Creates a resolver over the given stores with the standard defaults.
    pub fn new(accounts: Arc<dyn AccountRepository>, grants: Arc<dyn GrantRepository>) -> Self {
        Self {
            accounts,
            grants,
            defaults: RoleDefaults::new(),
        }
    }

    /// Creates a resolver with a custom default table.
    pub fn with_defaults(
        accounts: Arc<dyn AccountRepository>,
        grants: Arc<dyn GrantRepository>,
        defaults: RoleDefaults,
    ) -> Self {
        Self {
            accounts,
            grants,
            defaults,
        }
    }

    /// Single-permission check. This is the hot path consumed by every
    /// feature module; it never enumerates the full permission set.
    pub async fn has_permission(&self, user_id: Uuid, code: PermissionCode) -> AppResult<bool> {
        let Some(account) = self.accounts.find_by_id(user_id).await? else {
            return Ok(false);
        };

        // Bypass tier: no grant lookup at all.
        if account.role.is_admin() {
            return Ok(true);
        }

        let now = Utc::now();
        let grants = self
            .grants
            .find_by_user_and_code(user_id, code.as_str())
            .await?;
        if grants.iter().any(|grant| grant.is_effective(now)) {
            return Ok(true);
        }

        Ok(self.defaults.contains(&account.role, &code))
    }

    /// Full effective permission set, for presenting a capability list to
    /// a client. Not for per-call authorization.
    pub async fn effective_permissions(
        &self,
        user_id: Uuid,
    ) -> AppResult<HashSet<PermissionCode>> {
        let Some(account) = self.accounts.find_by_id(user_id).await? else {
            return Ok(HashSet::new());
        };

        if account.role.is_admin() {
            return Ok(PermissionCode::ALL.into_iter().collect());
        }

        let mut effective = self.defaults.permissions_for_role(&account.role);

        let now = Utc::now();
        for grant in self.grants.find_active_by_user(user_id).await? {
            if !grant.is_effective(now) {
                continue;
            }
            match PermissionCode::from_str(&grant.permission_code) {
                Ok(code) => {
                    effective.insert(code);
                }
                Err(_) => {
                    // A code outside the catalogue cannot be honored.
                    warn!(
                        grant_id = %grant.id,
                        code = %grant.permission_code,
                        "Skipping grant with unknown permission code"
                    );
                }
            }
        }

        Ok(effective)
    }
}
