//! In-memory API key repository implementation

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::api_key::{ApiKey, ApiKeyRepository};
use crate::domain::DomainError;

/// In-memory implementation of ApiKeyRepository
///
/// Records are fixed at construction; the core never writes API keys.
#[derive(Debug, Default)]
pub struct InMemoryApiKeyRepository {
    keys: HashMap<String, ApiKey>,
}

impl InMemoryApiKeyRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial keys
    pub fn with_keys(keys: impl IntoIterator<Item = ApiKey>) -> Self {
        Self {
            keys: keys
                .into_iter()
                .map(|k| (k.api_key_id.clone(), k))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn get(&self, api_key_id: &str) -> Result<Option<ApiKey>, DomainError> {
        Ok(self.keys.get(api_key_id).cloned())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
