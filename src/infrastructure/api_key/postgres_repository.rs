//! PostgreSQL API key repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::api_key::{ApiKey, ApiKeyRepository, ApiKeyTier};
use crate::domain::DomainError;

/// PostgreSQL implementation of ApiKeyRepository
///
/// Reads the `api_key` table owned by the identity service.
#[derive(Debug, Clone)]
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn get(&self, api_key_id: &str) -> Result<Option<ApiKey>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, api_key_id, user_id, type, expiration
            FROM api_key
            WHERE api_key_id = $1
            "#,
        )
        .bind(api_key_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get API key: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_api_key(&row)?)),
            None => Ok(None),
        }
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Database ping failed: {}", e)))?;

        Ok(())
    }
}

fn row_to_api_key(row: &sqlx::postgres::PgRow) -> Result<ApiKey, DomainError> {
    let decode = |e: sqlx::Error| DomainError::storage(format!("Invalid API key row: {}", e));

    let id: i64 = row.try_get("id").map_err(decode)?;
    let api_key_id: String = row.try_get("api_key_id").map_err(decode)?;
    let user_id: String = row.try_get("user_id").map_err(decode)?;
    let tier: i16 = row.try_get("type").map_err(decode)?;
    let expiration: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("expiration").map_err(decode)?;

    let mut api_key = ApiKey::new(api_key_id, user_id, ApiKeyTier::from_code(tier)).with_id(id);
    api_key.expiration = expiration;

    Ok(api_key)
}
