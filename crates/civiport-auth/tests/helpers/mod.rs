//! Shared in-memory fakes for exercising the authentication and
//! authorization flows without a database.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use civiport_auth::password::PasswordHasher;
use civiport_auth::{Authenticator, SessionIssuer};
use civiport_cache::MemoryCounterStore;
use civiport_core::config::auth::AuthConfig;
use civiport_core::result::AppResult;
use civiport_entity::account::{Account, Role};
use civiport_entity::audit::{AuditAction, AuditEvent};
use civiport_entity::permission::{NewGrant, PermissionGrant};
use civiport_entity::store::{AccountRepository, AuditSink, GrantRepository};

/// In-memory account repository.
#[derive(Default)]
pub struct MemoryAccounts {
    accounts: DashMap<Uuid, Account>,
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    pub fn get(&self, id: Uuid) -> Option<Account> {
        self.accounts.get(&id).map(|a| a.clone())
    }
}

#[async_trait]
impl AccountRepository for MemoryAccounts {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        Ok(self.accounts.get(&id).map(|a| a.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .map(|a| a.clone()))
    }

    async fn record_login(&self, id: Uuid) -> AppResult<()> {
        if let Some(mut account) = self.accounts.get_mut(&id) {
            account.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn replace_backup_codes(&self, id: Uuid, codes: &[String]) -> AppResult<()> {
        if let Some(mut account) = self.accounts.get_mut(&id) {
            account.backup_codes = codes.to_vec();
        }
        Ok(())
    }
}

/// In-memory grant repository.
#[derive(Default)]
pub struct MemoryGrants {
    grants: DashMap<Uuid, PermissionGrant>,
}

impl MemoryGrants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, grant: PermissionGrant) {
        self.grants.insert(grant.id, grant);
    }
}

#[async_trait]
impl GrantRepository for MemoryGrants {
    async fn find_active_by_user(&self, user_id: Uuid) -> AppResult<Vec<PermissionGrant>> {
        Ok(self
            .grants
            .iter()
            .filter(|g| g.user_id == user_id && g.active)
            .map(|g| g.clone())
            .collect())
    }

    async fn find_by_user_and_code(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> AppResult<Vec<PermissionGrant>> {
        Ok(self
            .grants
            .iter()
            .filter(|g| g.user_id == user_id && g.active && g.permission_code == code)
            .map(|g| g.clone())
            .collect())
    }

    async fn create(&self, grant: &NewGrant) -> AppResult<PermissionGrant> {
        let created = PermissionGrant {
            id: Uuid::new_v4(),
            user_id: grant.user_id,
            permission_code: grant.permission_code.clone(),
            active: true,
            expires_at: grant.expires_at,
            granted_by: grant.granted_by,
            granted_at: Utc::now(),
        };
        self.grants.insert(created.id, created.clone());
        Ok(created)
    }

    async fn deactivate(&self, grant_id: Uuid) -> AppResult<bool> {
        match self.grants.get_mut(&grant_id) {
            Some(mut grant) => {
                grant.active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Audit sink that captures emitted events for assertions.
#[derive(Default)]
pub struct CaptureSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> Vec<AuditAction> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.action)
            .collect()
    }
}

#[async_trait]
impl AuditSink for CaptureSink {
    async fn emit(&self, event: AuditEvent) -> AppResult<()> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// Everything a flow test needs, wired over the in-memory fakes.
pub struct TestHarness {
    pub authenticator: Authenticator,
    pub accounts: Arc<MemoryAccounts>,
    pub grants: Arc<MemoryGrants>,
    pub audit: Arc<CaptureSink>,
    pub issuer: Arc<SessionIssuer>,
    pub config: AuthConfig,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AuthConfig) -> Self {
        let accounts = Arc::new(MemoryAccounts::new());
        let grants = Arc::new(MemoryGrants::new());
        let audit = Arc::new(CaptureSink::new());
        let issuer = Arc::new(SessionIssuer::new(&config));

        let authenticator = Authenticator::new(
            Arc::clone(&accounts) as Arc<dyn AccountRepository>,
            Arc::new(MemoryCounterStore::new()),
            Arc::clone(&issuer),
            Arc::clone(&audit) as Arc<dyn AuditSink>,
            &config,
        );

        Self {
            authenticator,
            accounts,
            grants,
            audit,
            issuer,
            config,
        }
    }

    /// Create and store an account with the given password.
    pub fn create_account(&self, email: &str, password: &str, role: Role) -> Account {
        let hash = PasswordHasher::new().hash_password(password).unwrap();
        let account = build_account(email, &hash, role);
        self.accounts.insert(account.clone());
        account
    }
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".to_string(),
        max_failed_attempts: 3,
        lockout_duration_minutes: 30,
        two_factor_max_attempts: 3,
        two_factor_lockout_minutes: 15,
        ..AuthConfig::default()
    }
}

pub fn build_account(email: &str, password_hash: &str, role: Role) -> Account {
    let now = Utc::now();
    Account {
        id: Uuid::new_v4(),
        email: email.to_lowercase(),
        password_hash: password_hash.to_string(),
        display_name: None,
        role,
        active: true,
        email_verified: true,
        two_factor_secret: None,
        two_factor_enabled: false,
        backup_codes: Vec::new(),
        sector: None,
        establishment_ids: Vec::new(),
        commune_id: None,
        last_login_at: None,
        created_at: now,
        updated_at: now,
    }
}
