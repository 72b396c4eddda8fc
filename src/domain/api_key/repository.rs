//! API Key repository trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::entity::ApiKey;
use crate::domain::DomainError;

/// Read access to durable API key records
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApiKeyRepository: Send + Sync + std::fmt::Debug {
    /// Get an API key by the identifier clients present
    async fn get(&self, api_key_id: &str) -> Result<Option<ApiKey>, DomainError>;

    /// Verifies the store is reachable
    async fn ping(&self) -> Result<(), DomainError>;
}
