//! Quote service - the rate-limited read path

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::api_key::ApiKeyRepository;
use crate::domain::quote::{CurrencyPair, QuoteResponse};
use crate::domain::{Clock, DomainError, SystemClock};
use crate::infrastructure::api_key::ApiKeyGate;
use crate::infrastructure::observability::{quote_outcome, record_quote_request};

use super::reader::QuoteReader;

/// What to do when a served request cannot be recorded against the quota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UsageRecordingPolicy {
    /// Fail the request
    #[default]
    Strict,
    /// Log the failure and return the rates anyway
    BestEffort,
}

/// Admits the caller, resolves the requested rates and records the usage
#[derive(Debug)]
pub struct QuoteService<R: ApiKeyRepository + ?Sized> {
    gate: ApiKeyGate<R>,
    reader: QuoteReader,
    clock: Arc<dyn Clock>,
    policy: UsageRecordingPolicy,
}

impl<R: ApiKeyRepository + ?Sized> QuoteService<R> {
    pub fn new(gate: ApiKeyGate<R>, reader: QuoteReader) -> Self {
        Self {
            gate,
            reader,
            clock: Arc::new(SystemClock),
            policy: UsageRecordingPolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_policy(mut self, policy: UsageRecordingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Serves one quote request at the injected clock's current time
    pub async fn get_rate(
        &self,
        api_key_id: &str,
        pairs: &[CurrencyPair],
    ) -> Result<QuoteResponse, DomainError> {
        let now = self.clock.now();
        let result = self.get_rate_at(api_key_id, pairs, now).await;

        record_quote_request(quote_outcome(&result));
        result
    }

    /// Serves one quote request at `now`
    ///
    /// Admission, lookup and recording happen in that order; nothing is
    /// recorded unless every pair resolved. An empty pair list is rejected
    /// before admission.
    pub async fn get_rate_at(
        &self,
        api_key_id: &str,
        pairs: &[CurrencyPair],
        now: DateTime<Utc>,
    ) -> Result<QuoteResponse, DomainError> {
        if pairs.is_empty() {
            return Err(DomainError::validation("At least one currency pair is required"));
        }

        let state = self.gate.admit(api_key_id, now).await?;
        let rates = self.reader.fetch_rates(pairs).await?;

        if let Err(e) = self.gate.record_usage(state, now).await {
            match self.policy {
                UsageRecordingPolicy::Strict => return Err(e),
                UsageRecordingPolicy::BestEffort => {
                    warn!(api_key = %api_key_id, error = %e, "Failed to record API key usage");
                }
            }
        }

        debug!(api_key = %api_key_id, count = rates.len(), "Served quote");
        Ok(QuoteResponse { rates })
    }
}
