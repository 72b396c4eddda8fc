//! Cache key construction for quota state and currency-pair rates

/// Prefix for cached API key quota state
const API_KEY_PREFIX: &str = "api_key";

/// Prefix for cached currency-pair rates
const RATE_PREFIX: &str = "rate";

/// Builds the cache key holding the quota state of an API key
///
/// The identifier is used verbatim.
pub fn api_key_key(api_key_id: &str) -> String {
    format!("{}_{}", API_KEY_PREFIX, api_key_id)
}

/// Builds the cache key holding the rate of a currency pair
///
/// Currency codes are lowercased so that `USD/JPY` and `usd/jpy` share an entry.
pub fn rate_key(from: &str, to: &str) -> String {
    format!(
        "{}_{}_{}",
        RATE_PREFIX,
        from.to_lowercase(),
        to.to_lowercase()
    )
}
