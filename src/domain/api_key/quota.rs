//! Sliding-window quota state cached per API key

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{ApiKey, ApiKeyTier};

/// Length of the sliding window
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

/// Requests admitted per window for `Limited` keys
pub const RATE_LIMIT_MAX_USAGES: usize = 2;

/// Lifetime of cached quota state and cached rates
pub const MAX_CACHE_LIFETIME: Duration = Duration::from_secs(600);

/// Rate limit policy applied by the API key gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_usages: usize,
    /// TTL applied when quota state is written back
    pub state_ttl: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: RATE_LIMIT_WINDOW,
            max_usages: RATE_LIMIT_MAX_USAGES,
            state_ttl: MAX_CACHE_LIFETIME,
        }
    }
}

impl RateLimitConfig {
    pub fn new(window: Duration, max_usages: usize) -> Self {
        Self {
            window,
            max_usages,
            ..Default::default()
        }
    }

    pub fn with_state_ttl(mut self, ttl: Duration) -> Self {
        self.state_ttl = ttl;
        self
    }

    /// Oldest unix second still inside the window ending at `now`
    pub fn window_start(&self, now: DateTime<Utc>) -> i64 {
        now.timestamp() - self.window.as_secs() as i64
    }
}

/// A single admitted request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyUsage {
    /// Unix seconds
    pub timestamp: i64,
}

/// Quota state of an API key as kept in the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeyQuotaState {
    pub api_key_id: String,
    pub tier: ApiKeyTier,
    #[serde(default)]
    pub usages: Vec<ApiKeyUsage>,
}

impl ApiKeyQuotaState {
    pub fn new(api_key_id: impl Into<String>, tier: ApiKeyTier) -> Self {
        Self {
            api_key_id: api_key_id.into(),
            tier,
            usages: Vec::new(),
        }
    }

    /// Fresh state for a key found in the persistent store
    pub fn seeded_from(api_key: &ApiKey) -> Self {
        Self::new(api_key.api_key_id.clone(), api_key.tier)
    }

    pub fn with_usages(mut self, timestamps: impl IntoIterator<Item = i64>) -> Self {
        self.usages
            .extend(timestamps.into_iter().map(|timestamp| ApiKeyUsage { timestamp }));
        self
    }

    /// Number of usages at or after `window_start`
    pub fn usages_since(&self, window_start: i64) -> usize {
        self.usages
            .iter()
            .filter(|u| u.timestamp >= window_start)
            .count()
    }

    /// Whether another request fits under `max_usages` in the current window
    pub fn within_allowed_range(&self, window_start: i64, max_usages: usize) -> bool {
        self.usages_since(window_start) < max_usages
    }

    /// Drops usages that can no longer affect admission
    pub fn prune(&mut self, window_start: i64) {
        self.usages.retain(|u| u.timestamp >= window_start);
    }

    /// Prunes, then appends a usage at `now`
    pub fn record(&mut self, now: i64, window_start: i64) {
        self.prune(window_start);
        self.usages.push(ApiKeyUsage { timestamp: now });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_default_policy_constants() {
        let config = RateLimitConfig::default();

        assert_eq!(config.window, Duration::from_secs(60));
        assert_eq!(config.max_usages, 2);
        assert_eq!(config.state_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_window_start() {
        let config = RateLimitConfig::default();
        assert_eq!(config.window_start(at(1_000)), 940);
    }

    #[test]
    fn test_usages_since_counts_boundary() {
        let state = ApiKeyQuotaState::new("k", ApiKeyTier::Limited).with_usages([939, 940, 999]);

        assert_eq!(state.usages_since(940), 2);
        assert!(!state.within_allowed_range(940, 2));
        assert!(state.within_allowed_range(941, 2));
    }

    #[test]
    fn test_prune_is_idempotent() {
        let mut state =
            ApiKeyQuotaState::new("k", ApiKeyTier::Limited).with_usages([100, 500, 940, 990]);

        state.prune(940);
        let once = state.clone();
        state.prune(940);

        assert_eq!(state, once);
        assert_eq!(
            state.usages,
            vec![ApiKeyUsage { timestamp: 940 }, ApiKeyUsage { timestamp: 990 }]
        );
    }

    #[test]
    fn test_record_prunes_then_appends() {
        let mut state = ApiKeyQuotaState::new("k", ApiKeyTier::Limited).with_usages([10, 990]);

        state.record(1_000, 940);

        assert_eq!(
            state.usages,
            vec![ApiKeyUsage { timestamp: 990 }, ApiKeyUsage { timestamp: 1_000 }]
        );
    }

    #[test]
    fn test_seeded_from_store_record_has_no_usages() {
        let key = ApiKey::new("key-1", "user-1", ApiKeyTier::Unlimited);
        let state = ApiKeyQuotaState::seeded_from(&key);

        assert_eq!(state.api_key_id, "key-1");
        assert_eq!(state.tier, ApiKeyTier::Unlimited);
        assert!(state.usages.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let state = ApiKeyQuotaState::new("k", ApiKeyTier::Limited).with_usages([42]);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "api_key_id": "k",
                "tier": "limited",
                "usages": [{ "timestamp": 42 }]
            })
        );
    }
}
