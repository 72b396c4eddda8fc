use std::time::Duration;

use serde::Deserialize;

use crate::domain::api_key::{
    RateLimitConfig, MAX_CACHE_LIFETIME, RATE_LIMIT_MAX_USAGES, RATE_LIMIT_WINDOW,
};
use crate::domain::quote::DEFAULT_BASE_CURRENCIES;
use crate::infrastructure::api_key::StoreConfig;
use crate::infrastructure::cache::CacheConfig;
use crate::infrastructure::fx_source::{FastForexConfig, FASTFOREX_API_URL};
use crate::infrastructure::observability::MetricsConfig;
use crate::infrastructure::quote::{UpdaterConfig, UsageRecordingPolicy, UPDATE_INTERVAL};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
    pub cache: CacheConfig,
    pub store: StoreConfig,
    pub rate_limit: RateLimitSettings,
    pub updater: UpdaterSettings,
    pub fx_source: FxSourceSettings,
    pub quote: QuoteSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub window_secs: u64,
    pub max_usages: usize,
    pub state_ttl_secs: u64,
    pub usage_recording: UsageRecordingPolicy,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            window_secs: RATE_LIMIT_WINDOW.as_secs(),
            max_usages: RATE_LIMIT_MAX_USAGES,
            state_ttl_secs: MAX_CACHE_LIFETIME.as_secs(),
            usage_recording: UsageRecordingPolicy::default(),
        }
    }
}

impl RateLimitSettings {
    pub fn to_rate_limit_config(&self) -> RateLimitConfig {
        RateLimitConfig::new(Duration::from_secs(self.window_secs), self.max_usages)
            .with_state_ttl(Duration::from_secs(self.state_ttl_secs))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpdaterSettings {
    pub interval_secs: u64,
    pub rate_ttl_secs: u64,
    pub base_currencies: Vec<String>,
}

impl Default for UpdaterSettings {
    fn default() -> Self {
        Self {
            interval_secs: UPDATE_INTERVAL.as_secs(),
            rate_ttl_secs: MAX_CACHE_LIFETIME.as_secs(),
            base_currencies: DEFAULT_BASE_CURRENCIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl UpdaterSettings {
    pub fn to_updater_config(&self) -> UpdaterConfig {
        UpdaterConfig {
            interval: Duration::from_secs(self.interval_secs.max(1)),
            rate_ttl: Duration::from_secs(self.rate_ttl_secs),
            base_currencies: self.base_currencies.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FxSourceSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for FxSourceSettings {
    fn default() -> Self {
        Self {
            base_url: FASTFOREX_API_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl FxSourceSettings {
    pub fn to_fastforex_config(&self) -> FastForexConfig {
        FastForexConfig::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    /// Deadline for one quote read
    pub timeout_secs: u64,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl QuoteSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("updater.base_currencies")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
