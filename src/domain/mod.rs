//! Domain layer - Core business logic and entities

pub mod api_key;
pub mod cache;
pub mod clock;
pub mod error;
pub mod quote;

pub use api_key::{
    ApiKey, ApiKeyQuotaState, ApiKeyRepository, ApiKeyTier, ApiKeyUsage, RateLimitConfig,
};
pub use cache::{api_key_key, rate_key, Cache, CacheExt};
pub use clock::{Clock, SystemClock};
pub use error::{DomainError, ErrorKind};
pub use quote::{
    parse_pair_list, CachedRate, CurrencyPair, QuoteResponse, RateResult, RateSource,
    UpstreamRate,
};
