//! API key gate
//!
//! Sliding-window admission for API keys. Quota state lives in the shared
//! cache under `api_key_key(id)`; on a miss the key is looked up in the
//! persistent store and a fresh state is seeded.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::api_key::{ApiKeyQuotaState, ApiKeyRepository, RateLimitConfig};
use crate::domain::cache::{api_key_key, Cache, CacheExt};
use crate::domain::DomainError;

/// Admits requests against the per-key quota and records usage
///
/// The read-modify-write on quota state is not atomic: two concurrent
/// requests for the same key may both be admitted from the same snapshot.
#[derive(Debug)]
pub struct ApiKeyGate<R: ApiKeyRepository + ?Sized> {
    cache: Arc<dyn Cache>,
    repository: Arc<R>,
    config: RateLimitConfig,
}

impl<R: ApiKeyRepository + ?Sized> ApiKeyGate<R> {
    pub fn new(cache: Arc<dyn Cache>, repository: Arc<R>) -> Self {
        Self {
            cache,
            repository,
            config: RateLimitConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RateLimitConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Decides whether a request for `api_key_id` may proceed at `now`
    ///
    /// Returns the current quota state without recording a usage; callers
    /// pass it back to [`record_usage`](Self::record_usage) once the request
    /// has been served.
    pub async fn admit(
        &self,
        api_key_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ApiKeyQuotaState, DomainError> {
        if api_key_id.is_empty() {
            return Err(DomainError::not_authorized("API key is required"));
        }

        let state = self.load_state(api_key_id).await?;
        let window_start = self.config.window_start(now);

        if state.tier.is_limited()
            && !state.within_allowed_range(window_start, self.config.max_usages)
        {
            warn!(
                api_key = %api_key_id,
                count = state.usages_since(window_start),
                "API key exceeded its quota"
            );
            return Err(DomainError::too_many_requests(format!(
                "API key '{}' exceeded {} requests per {}s",
                api_key_id,
                self.config.max_usages,
                self.config.window.as_secs()
            )));
        }

        Ok(state)
    }

    /// Prunes the usage log, appends `now` and writes the state back
    pub async fn record_usage(
        &self,
        mut state: ApiKeyQuotaState,
        now: DateTime<Utc>,
    ) -> Result<ApiKeyQuotaState, DomainError> {
        state.record(now.timestamp(), self.config.window_start(now));

        let key = api_key_key(&state.api_key_id);
        self.cache.set(&key, &state, self.config.state_ttl).await?;

        debug!(api_key = %state.api_key_id, count = state.usages.len(), "Recorded API key usage");
        Ok(state)
    }

    async fn load_state(&self, api_key_id: &str) -> Result<ApiKeyQuotaState, DomainError> {
        let key = api_key_key(api_key_id);

        if let Some(state) = self.cache.get::<ApiKeyQuotaState>(&key).await? {
            debug!(api_key = %api_key_id, "Quota state cache hit");
            return Ok(state);
        }

        debug!(api_key = %api_key_id, "Quota state cache miss, reading store");

        let api_key = self
            .repository
            .get(api_key_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", api_key_id)))?;

        Ok(ApiKeyQuotaState::seeded_from(&api_key))
    }
}
