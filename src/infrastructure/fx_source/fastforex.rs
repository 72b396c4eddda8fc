//! fastFOREX rate source

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, error};

use crate::domain::quote::{RateSource, UpstreamRate};
use crate::domain::DomainError;

pub const FASTFOREX_API_URL: &str = "https://api.fastforex.io";

const PROVIDER: &str = "fastforex";
const FETCH_ALL_ENDPOINT: &str = "fetch-all";
const UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Fiat currencies quoted by fastFOREX that may be used as a base
pub const SUPPORTED_FIAT_CURRENCIES: &[&str] = &[
    "AED", "ARS", "AUD", "BGN", "BRL", "CAD", "CHF", "CLP", "CNY", "COP", "CZK", "DKK", "EGP",
    "EUR", "GBP", "HKD", "HUF", "IDR", "ILS", "INR", "ISK", "JPY", "KRW", "KWD", "MXN", "MYR",
    "NOK", "NZD", "PEN", "PHP", "PKR", "PLN", "QAR", "RON", "SAR", "SEK", "SGD", "THB", "TRY",
    "TWD", "UAH", "USD", "VND", "ZAR",
];

/// Configuration for the fastFOREX client
#[derive(Debug, Clone)]
pub struct FastForexConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl FastForexConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: FASTFOREX_API_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct FetchAllResponse {
    #[serde(default)]
    base: String,
    #[serde(default)]
    results: BTreeMap<String, f64>,
    updated: String,
}

/// `RateSource` backed by the fastFOREX `fetch-all` endpoint
#[derive(Debug, Clone)]
pub struct FastForexSource {
    client: reqwest::Client,
    config: FastForexConfig,
}

impl FastForexSource {
    pub fn new(config: FastForexConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Bases to query: the supported list, narrowed to `allow_list` if non-empty
    fn bases_to_fetch(allow_list: &[String]) -> Vec<String> {
        if allow_list.is_empty() {
            return SUPPORTED_FIAT_CURRENCIES.iter().map(|c| c.to_string()).collect();
        }

        allow_list
            .iter()
            .map(|base| base.to_uppercase())
            .filter(|base| SUPPORTED_FIAT_CURRENCIES.contains(&base.as_str()))
            .collect()
    }

    async fn fetch_all_for(&self, base: &str) -> Result<Vec<UpstreamRate>, DomainError> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            FETCH_ALL_ENDPOINT
        );

        let response = self
            .client
            .get(&url)
            .query(&[("from", base), ("api_key", self.config.api_key.as_str())])
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| DomainError::provider(PROVIDER, format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            error!(status = %status, base, "fastFOREX returned an error status");
            return Err(DomainError::provider(
                PROVIDER,
                format!("HTTP {} fetching rates for {}", status, base),
            ));
        }

        let body: FetchAllResponse = response.json().await.map_err(|e| {
            DomainError::provider(PROVIDER, format!("Invalid response for {}: {}", base, e))
        })?;

        let timestamp = parse_updated(&body.updated)?;

        debug!(base = %body.base, count = body.results.len(), "Fetched fastFOREX rates");

        Ok(body
            .results
            .into_iter()
            .map(|(to, rate)| UpstreamRate::new(base, to, rate, timestamp))
            .collect())
    }
}

/// Parses the `updated` field, reported in UTC, into unix seconds
fn parse_updated(updated: &str) -> Result<i64, DomainError> {
    NaiveDateTime::parse_from_str(updated, UPDATED_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|e| {
            DomainError::provider(PROVIDER, format!("Invalid timestamp '{}': {}", updated, e))
        })
}

#[async_trait]
impl RateSource for FastForexSource {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch_all_rates(
        &self,
        base_currencies: &[String],
    ) -> Result<Vec<UpstreamRate>, DomainError> {
        let mut rates = Vec::new();
        for base in Self::bases_to_fetch(base_currencies) {
            rates.extend(self.fetch_all_for(&base).await?);
        }

        Ok(rates)
    }
}
