//! Quote updater - periodically republishes upstream rates into the cache

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::domain::api_key::MAX_CACHE_LIFETIME;
use crate::domain::cache::{rate_key, Cache, CacheExt};
use crate::domain::quote::{RateSource, DEFAULT_BASE_CURRENCIES};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_rates_published, record_update_cycle};

/// Refresh period of the updater
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(20);

/// Updater configuration
#[derive(Debug, Clone, PartialEq)]
pub struct UpdaterConfig {
    pub interval: Duration,
    /// TTL of each published rate
    pub rate_ttl: Duration,
    pub base_currencies: Vec<String>,
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            interval: UPDATE_INTERVAL,
            rate_ttl: MAX_CACHE_LIFETIME,
            base_currencies: DEFAULT_BASE_CURRENCIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Background task keeping the rate cache warm
#[derive(Debug)]
pub struct QuoteUpdater {
    cache: Arc<dyn Cache>,
    source: Arc<dyn RateSource>,
    config: UpdaterConfig,
}

impl QuoteUpdater {
    pub fn new(cache: Arc<dyn Cache>, source: Arc<dyn RateSource>) -> Self {
        Self {
            cache,
            source,
            config: UpdaterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: UpdaterConfig) -> Self {
        self.config = config;
        self
    }

    /// Fetches every rate and writes it under its pair key
    ///
    /// The first failing write aborts the rest of the cycle. Returns the
    /// number of rates published.
    pub async fn refresh_once(&self) -> Result<usize, DomainError> {
        let rates = self
            .source
            .fetch_all_rates(&self.config.base_currencies)
            .await?;

        debug!(source = self.source.name(), count = rates.len(), "Fetched upstream rates");

        let mut published = 0;
        for rate in &rates {
            let key = rate_key(&rate.from, &rate.to);
            let result = self.cache.set(&key, &rate.cached(), self.config.rate_ttl).await;

            if let Err(e) = result {
                record_rates_published(published);
                return Err(e);
            }
            published += 1;
        }

        record_rates_published(published);
        Ok(published)
    }

    /// Runs one cycle immediately, then one per interval, until cancelled
    ///
    /// Cancellation is observed between cycles; a running cycle completes
    /// and no further cycle starts once the token is cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        if cancel.is_cancelled() {
            info!("Quote updater cancelled before start");
            return;
        }

        info!(
            interval_secs = self.config.interval.as_secs(),
            source = self.source.name(),
            "Starting quote updater"
        );

        self.run_cycle().await;

        let mut ticker = interval_at(Instant::now() + self.config.interval, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    info!("Quote updater stopped");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_cycle().await;
                }
            }
        }
    }

    /// Spawns [`run`](Self::run) on the current runtime
    pub fn spawn(self: Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(cancel).await })
    }

    async fn run_cycle(&self) {
        match self.refresh_once().await {
            Ok(count) => {
                info!(count, "Published rates");
                record_update_cycle(true);
            }
            Err(e) => {
                error!(error = %e, "Quote update cycle failed");
                record_update_cycle(false);
            }
        }
    }
}
