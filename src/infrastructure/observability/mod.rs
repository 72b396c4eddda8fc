//! Observability infrastructure - Prometheus metrics

mod config;
mod metrics;

pub use config::MetricsConfig;
pub use metrics::{
    init_metrics, quote_outcome, record_quote_request, record_rates_published,
    record_update_cycle,
};
