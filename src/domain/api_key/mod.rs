//! API Key domain
//!
//! Durable API key records, their quota tier, and the sliding-window quota
//! state kept for each key in the cache.

mod entity;
mod quota;
mod repository;

pub use entity::{ApiKey, ApiKeyTier};
pub use quota::{
    ApiKeyQuotaState, ApiKeyUsage, RateLimitConfig, MAX_CACHE_LIFETIME, RATE_LIMIT_MAX_USAGES,
    RATE_LIMIT_WINDOW,
};
pub use repository::ApiKeyRepository;

#[cfg(test)]
pub use repository::MockApiKeyRepository;
