//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, FxSourceSettings, LogFormat, LoggingConfig, QuoteSettings, RateLimitSettings,
    UpdaterSettings,
};
