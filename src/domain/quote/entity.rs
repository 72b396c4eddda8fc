//! Quote records

use serde::{Deserialize, Serialize};

use super::pair::CurrencyPair;

/// Rate of one pair as published into the cache by the updater
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedRate {
    /// Multiplier converting `from` into `to`
    pub rate: f64,
    /// Unix seconds at which the source reported the rate
    pub timestamp: i64,
}

/// One resolved pair in a quote response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateResult {
    pub pair: CurrencyPair,
    pub rate: f64,
    pub timestamp: i64,
}

impl RateResult {
    pub fn new(pair: CurrencyPair, cached: CachedRate) -> Self {
        Self {
            pair,
            rate: cached.rate,
            timestamp: cached.timestamp,
        }
    }
}

/// Response of a quote read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub rates: Vec<RateResult>,
}

/// A rate as reported by the upstream source
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRate {
    pub from: String,
    pub to: String,
    pub rate: f64,
    /// Unix seconds
    pub timestamp: i64,
}

impl UpstreamRate {
    pub fn new(from: impl Into<String>, to: impl Into<String>, rate: f64, timestamp: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rate,
            timestamp,
        }
    }

    pub fn cached(&self) -> CachedRate {
        CachedRate {
            rate: self.rate,
            timestamp: self.timestamp,
        }
    }
}
