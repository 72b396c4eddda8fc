//! Prometheus metrics infrastructure

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::domain::{DomainError, ErrorKind};

use super::config::MetricsConfig;

/// Outcome label of a quote read
pub fn quote_outcome<T>(result: &Result<T, DomainError>) -> &'static str {
    match result {
        Ok(_) => "success",
        Err(e) => match e.kind() {
            ErrorKind::NotAuthorized => "not_authorized",
            ErrorKind::NotFound => "not_found",
            ErrorKind::TooManyRequests => "too_many_requests",
            ErrorKind::InvalidParameter => "invalid_parameter",
            ErrorKind::Internal => "internal",
        },
    }
}

/// Install the Prometheus recorder with its own scrape listener
///
/// Must be called from within a tokio runtime. Returns whether a recorder
/// was installed; failures are logged and metrics stay no-ops.
pub fn init_metrics(config: &MetricsConfig) -> bool {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return false;
    }

    match PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .install()
    {
        Ok(()) => {
            register_default_metrics();
            tracing::info!("Prometheus metrics listening on {}", config.listen_addr);
            true
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            false
        }
    }
}

fn register_default_metrics() {
    gauge!("fxnow_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a served or rejected quote read
pub fn record_quote_request(outcome: &'static str) {
    counter!("fx_quote_requests_total", "outcome" => outcome).increment(1);
}

/// Record a finished updater cycle
pub fn record_update_cycle(success: bool) {
    let outcome = if success { "success" } else { "error" };
    counter!("fx_update_cycles_total", "outcome" => outcome).increment(1);
}

/// Record rates written into the cache
pub fn record_rates_published(count: usize) {
    counter!("fx_rates_published_total").increment(count as u64);
}
