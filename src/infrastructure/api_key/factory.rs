//! API key store selection

use std::sync::Arc;

use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::domain::api_key::{ApiKey, ApiKeyRepository, ApiKeyTier};
use crate::domain::DomainError;

use super::postgres_repository::PostgresApiKeyRepository;
use super::repository::InMemoryApiKeyRepository;

/// Supported API key stores
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    #[default]
    #[serde(alias = "inmemory", alias = "memory")]
    InMemory,
    #[serde(alias = "postgresql")]
    Postgres,
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreType::InMemory => write!(f, "in_memory"),
            StoreType::Postgres => write!(f, "postgres"),
        }
    }
}

/// API key declared in configuration for the in-memory store
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiKeySeed {
    pub api_key_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub tier: ApiKeyTier,
}

impl From<ApiKeySeed> for ApiKey {
    fn from(seed: ApiKeySeed) -> Self {
        ApiKey::new(seed.api_key_id, seed.user_id, seed.tier)
    }
}

/// Persistent store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    #[serde(rename = "type")]
    pub store_type: StoreType,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub api_keys: Vec<ApiKeySeed>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: StoreType::InMemory,
            database_url: None,
            max_connections: 5,
            api_keys: Vec::new(),
        }
    }
}

/// Builds the configured API key repository
pub async fn create_api_key_repository(
    config: &StoreConfig,
) -> Result<Arc<dyn ApiKeyRepository>, DomainError> {
    match config.store_type {
        StoreType::InMemory => {
            let repository =
                InMemoryApiKeyRepository::with_keys(config.api_keys.iter().cloned().map(ApiKey::from));
            info!(count = repository.len(), "Using in-memory API key store");
            Ok(Arc::new(repository))
        }
        StoreType::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                DomainError::configuration("database_url is required for the postgres store")
            })?;

            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(url)
                .await
                .map_err(|e| DomainError::storage(format!("Failed to connect to database: {}", e)))?;

            info!(max_connections = config.max_connections, "Using PostgreSQL API key store");
            Ok(Arc::new(PostgresApiKeyRepository::new(pool)))
        }
    }
}
