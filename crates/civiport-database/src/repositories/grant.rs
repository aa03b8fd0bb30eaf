//! Permission grant repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use civiport_core::error::{AppError, ErrorKind};
use civiport_core::result::AppResult;
use civiport_entity::permission::{NewGrant, PermissionGrant};
use civiport_entity::store::GrantRepository;

/// PostgreSQL-backed permission grant repository.
#[derive(Debug, Clone)]
pub struct PgGrantRepository {
    pool: PgPool,
}

impl PgGrantRepository {
    /// Create a new grant repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GrantRepository for PgGrantRepository {
    async fn find_active_by_user(&self, user_id: Uuid) -> AppResult<Vec<PermissionGrant>> {
        sqlx::query_as::<_, PermissionGrant>(
            "SELECT * FROM permission_grants WHERE user_id = $1 AND active = TRUE \
             ORDER BY granted_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list grants for user", e)
        })
    }

    async fn find_by_user_and_code(
        &self,
        user_id: Uuid,
        code: &str,
    ) -> AppResult<Vec<PermissionGrant>> {
        sqlx::query_as::<_, PermissionGrant>(
            "SELECT * FROM permission_grants \
             WHERE user_id = $1 AND permission_code = $2 AND active = TRUE",
        )
        .bind(user_id)
        .bind(code)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find grants by code", e)
        })
    }

    async fn create(&self, grant: &NewGrant) -> AppResult<PermissionGrant> {
        sqlx::query_as::<_, PermissionGrant>(
            "INSERT INTO permission_grants \
             (id, user_id, permission_code, active, expires_at, granted_by, granted_at) \
             VALUES ($1, $2, $3, TRUE, $4, $5, NOW()) \
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(grant.user_id)
        .bind(&grant.permission_code)
        .bind(grant.expires_at)
        .bind(grant.granted_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create grant", e))
    }

    async fn deactivate(&self, grant_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE permission_grants SET active = FALSE WHERE id = $1 AND active = TRUE",
        )
        .bind(grant_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to deactivate grant", e))?;

        Ok(result.rows_affected() > 0)
    }
}
