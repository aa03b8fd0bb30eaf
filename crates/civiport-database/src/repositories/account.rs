//! Account repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use civiport_core::error::{AppError, ErrorKind};
use civiport_core::result::AppResult;
use civiport_entity::account::Account;
use civiport_entity::store::AccountRepository;

/// PostgreSQL-backed account repository.
#[derive(Debug, Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
            })
    }

    async fn record_login(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE accounts SET last_login_at = NOW(), updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to record login", e)
            })?;
        Ok(())
    }

    async fn replace_backup_codes(&self, id: Uuid, codes: &[String]) -> AppResult<()> {
        sqlx::query("UPDATE accounts SET backup_codes = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(codes)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to replace backup codes", e)
            })?;
        Ok(())
    }
}
