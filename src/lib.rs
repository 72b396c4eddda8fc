//! fxnow gateway
//!
//! Serves currency-pair exchange rates from a short-lived cache while
//! enforcing a per-API-key sliding-window quota kept in the same cache:
//! - Cache-backed quote reads gated by API key quota
//! - Background updater republishing upstream rates on a timer
//! - In-memory (moka) or Redis cache, in-memory or PostgreSQL key store

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use domain::{ApiKeyRepository, Cache, SystemClock};
use infrastructure::{
    api_key::{create_api_key_repository, ApiKeyGate},
    cache::CacheFactory,
    fx_source::FastForexSource,
    quote::{QuoteReader, QuoteService, QuoteUpdater},
};
use tracing::info;

/// Quote service over a runtime-selected key store
pub type DynQuoteService = QuoteService<dyn ApiKeyRepository>;

/// Create the configured cache
pub async fn create_cache(config: &AppConfig) -> anyhow::Result<Arc<dyn Cache>> {
    info!("Cache backend: {}", config.cache.cache_type);

    let cache = CacheFactory::new().create(&config.cache).await?;
    ensure_cache_reachable(cache.as_ref()).await?;

    Ok(cache)
}

/// Create the read path: gate, reader and service sharing one cache
pub async fn create_quote_service(
    config: &AppConfig,
    cache: Arc<dyn Cache>,
) -> anyhow::Result<DynQuoteService> {
    info!("API key store: {}", config.store.store_type);

    let repository = create_api_key_repository(&config.store).await?;
    ensure_store_reachable(repository.as_ref()).await?;

    let gate = ApiKeyGate::new(cache.clone(), repository)
        .with_config(config.rate_limit.to_rate_limit_config());

    Ok(QuoteService::new(gate, QuoteReader::new(cache))
        .with_clock(Arc::new(SystemClock))
        .with_policy(config.rate_limit.usage_recording))
}

/// Create the rate updater against the fastFOREX source
pub fn create_quote_updater(
    config: &AppConfig,
    cache: Arc<dyn Cache>,
) -> anyhow::Result<QuoteUpdater> {
    if config.fx_source.api_key.is_empty() {
        anyhow::bail!("fx_source.api_key is required to run the updater");
    }

    let source = FastForexSource::new(config.fx_source.to_fastforex_config())?;

    Ok(QuoteUpdater::new(cache, Arc::new(source))
        .with_config(config.updater.to_updater_config()))
}

async fn ensure_cache_reachable(cache: &dyn Cache) -> anyhow::Result<()> {
    cache
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Cache backend is unreachable: {}", e))
}

async fn ensure_store_reachable(repository: &dyn ApiKeyRepository) -> anyhow::Result<()> {
    repository
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("API key store is unreachable: {}", e))
}
