//! Integration tests for permission resolution over in-memory stores.

mod helpers;

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use civiport_auth::{PermissionResolver, RoleDefaults};
use civiport_entity::account::Role;
use civiport_entity::permission::{NewGrant, PermissionCode, PermissionGrant};
use civiport_entity::store::{AccountRepository, GrantRepository};

use helpers::{MemoryAccounts, MemoryGrants, build_account};

struct Setup {
    resolver: PermissionResolver,
    accounts: Arc<MemoryAccounts>,
    grants: Arc<MemoryGrants>,
}

fn setup() -> Setup {
    let accounts = Arc::new(MemoryAccounts::new());
    let grants = Arc::new(MemoryGrants::new());
    let resolver = PermissionResolver::new(
        Arc::clone(&accounts) as Arc<dyn AccountRepository>,
        Arc::clone(&grants) as Arc<dyn GrantRepository>,
    );
    Setup {
        resolver,
        accounts,
        grants,
    }
}

fn add_account(s: &Setup, role: Role) -> Uuid {
    let account = build_account("someone@example.org", "", role);
    let id = account.id;
    s.accounts.insert(account);
    id
}

fn new_grant(user_id: Uuid, code: &str, expires_at: Option<chrono::DateTime<Utc>>) -> NewGrant {
    NewGrant {
        user_id,
        permission_code: code.to_string(),
        expires_at,
        granted_by: Uuid::new_v4(),
    }
}

#[tokio::test]
async fn test_admin_bypasses_grants_entirely() {
    let s = setup();
    let id = add_account(&s, Role::Admin);

    // No grants exist, yet every permission resolves to allowed.
    assert!(s
        .resolver
        .has_permission(id, PermissionCode::SettingsManage)
        .await
        .unwrap());
    assert!(s
        .resolver
        .has_permission(id, PermissionCode::GrantManage)
        .await
        .unwrap());

    let effective = s.resolver.effective_permissions(id).await.unwrap();
    assert_eq!(effective.len(), PermissionCode::ALL.len());
}

#[tokio::test]
async fn test_role_defaults_apply_without_grants() {
    let s = setup();
    let id = add_account(&s, Role::Citizen);

    assert!(s
        .resolver
        .has_permission(id, PermissionCode::FileUpload)
        .await
        .unwrap());
    assert!(!s
        .resolver
        .has_permission(id, PermissionCode::NewsPublish)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_unknown_account_has_no_permissions() {
    let s = setup();
    let id = Uuid::new_v4();

    assert!(!s
        .resolver
        .has_permission(id, PermissionCode::FileUpload)
        .await
        .unwrap());
    assert!(s.resolver.effective_permissions(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_active_grant_extends_role_defaults() {
    let s = setup();
    let id = add_account(&s, Role::Citizen);

    s.grants
        .create(&new_grant(id, "news_publish", None))
        .await
        .unwrap();

    assert!(s
        .resolver
        .has_permission(id, PermissionCode::NewsPublish)
        .await
        .unwrap());

    let effective = s.resolver.effective_permissions(id).await.unwrap();
    assert!(effective.contains(&PermissionCode::NewsPublish));
    assert!(effective.contains(&PermissionCode::FileUpload));
}

#[tokio::test]
async fn test_expired_grant_does_not_count() {
    let s = setup();
    let id = add_account(&s, Role::Citizen);

    s.grants
        .create(&new_grant(
            id,
            "news_publish",
            Some(Utc::now() - Duration::minutes(5)),
        ))
        .await
        .unwrap();

    assert!(!s
        .resolver
        .has_permission(id, PermissionCode::NewsPublish)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_deactivated_grant_stops_counting() {
    let s = setup();
    let id = add_account(&s, Role::Citizen);

    let grant = s
        .grants
        .create(&new_grant(id, "news_publish", None))
        .await
        .unwrap();
    assert!(s
        .resolver
        .has_permission(id, PermissionCode::NewsPublish)
        .await
        .unwrap());

    assert!(s.grants.deactivate(grant.id).await.unwrap());
    assert!(!s
        .resolver
        .has_permission(id, PermissionCode::NewsPublish)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_future_expiry_counts_until_it_passes() {
    let s = setup();
    let id = add_account(&s, Role::Agent);

    s.grants
        .create(&new_grant(
            id,
            "report_export",
            Some(Utc::now() + Duration::hours(1)),
        ))
        .await
        .unwrap();

    assert!(s
        .resolver
        .has_permission(id, PermissionCode::ReportExport)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_empty_default_set_resolves_to_false() {
    let accounts = Arc::new(MemoryAccounts::new());
    let grants = Arc::new(MemoryGrants::new());
    // A table with no entry for any role: only grants or the bypass tier
    // can allow anything.
    let resolver = PermissionResolver::with_defaults(
        Arc::clone(&accounts) as Arc<dyn AccountRepository>,
        Arc::clone(&grants) as Arc<dyn GrantRepository>,
        RoleDefaults::empty(),
    );
    let account = build_account("someone@example.org", "", Role::Citizen);
    let id = account.id;
    accounts.insert(account);

    assert!(!resolver
        .has_permission(id, PermissionCode::FileUpload)
        .await
        .unwrap());
    assert!(resolver.effective_permissions(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_grant_code_is_skipped() {
    let s = setup();
    let id = add_account(&s, Role::Citizen);

    s.grants.insert(PermissionGrant {
        id: Uuid::new_v4(),
        user_id: id,
        permission_code: "retired_feature_toggle".to_string(),
        active: true,
        expires_at: None,
        granted_by: Uuid::new_v4(),
        granted_at: Utc::now(),
    });

    // Only the role default survives into the effective set.
    let effective = s.resolver.effective_permissions(id).await.unwrap();
    assert_eq!(effective.len(), 1);
    assert!(effective.contains(&PermissionCode::FileUpload));
}
