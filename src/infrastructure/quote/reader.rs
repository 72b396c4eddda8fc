//! Quote reader - resolves pair rates from the cache

use std::sync::Arc;

use tracing::debug;

use crate::domain::cache::{rate_key, Cache, CacheExt};
use crate::domain::quote::{CachedRate, CurrencyPair, RateResult};
use crate::domain::DomainError;

/// Reads published rates; never writes
#[derive(Debug, Clone)]
pub struct QuoteReader {
    cache: Arc<dyn Cache>,
}

impl QuoteReader {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self { cache }
    }

    /// Resolves every pair in order
    ///
    /// All-or-nothing: the first pair without a cached rate fails the whole
    /// call with `NotFound`. Duplicates are resolved once per occurrence.
    pub async fn fetch_rates(&self, pairs: &[CurrencyPair]) -> Result<Vec<RateResult>, DomainError> {
        let mut results = Vec::with_capacity(pairs.len());

        for pair in pairs {
            let key = rate_key(pair.from(), pair.to());

            let cached = self
                .cache
                .get::<CachedRate>(&key)
                .await
                .map_err(|e| DomainError::cache(format!("Failed to read rate for {}: {}", pair, e)))?
                .ok_or_else(|| DomainError::not_found(format!("No rate available for {}", pair)))?;

            debug!(pair = %pair, rate = cached.rate, "Rate cache hit");
            results.push(RateResult::new(pair.clone(), cached));
        }

        Ok(results)
    }
}
