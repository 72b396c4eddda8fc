//! Upstream rate source port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::entity::UpstreamRate;
use crate::domain::DomainError;

/// Base currencies refreshed by default
pub const DEFAULT_BASE_CURRENCIES: [&str; 7] = ["USD", "GBP", "EUR", "JPY", "CHF", "CAD", "AUD"];

/// Source of fresh exchange rates
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RateSource: Send + Sync + std::fmt::Debug {
    /// Provider name, used in logs and errors
    fn name(&self) -> &'static str;

    /// Fetches every rate quoted against each base currency in `base_currencies`
    async fn fetch_all_rates(
        &self,
        base_currencies: &[String],
    ) -> Result<Vec<UpstreamRate>, DomainError>;
}
