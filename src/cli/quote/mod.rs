//! Quote command - serves one quote read and prints it as JSON

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Args;
use serde::Serialize;
use serde_json::json;

use crate::domain::{parse_pair_list, DomainError, QuoteResponse, RateResult};
use crate::DynQuoteService;

/// Arguments for the quote command
#[derive(Args, Clone, Debug)]
pub struct QuoteArgs {
    /// API key to charge the read against
    #[arg(long)]
    pub api_key: String,

    /// Comma separated pairs, e.g. USD_JPY,EUR_USD
    #[arg(long)]
    pub pairs: String,
}

#[derive(Debug, Serialize)]
struct QuoteOutput {
    rates: Vec<RateResult>,
    /// Milliseconds spent serving the read
    took: u64,
}

/// Run one quote read and print the result
pub async fn run(args: QuoteArgs) -> anyhow::Result<ExitCode> {
    let config = super::bootstrap()?;

    let cache = crate::create_cache(&config).await?;
    let service = crate::create_quote_service(&config, cache).await?;

    let started = Instant::now();
    let result = execute(&service, &args, config.quote.timeout()).await;

    let (output, code) = render(result, started.elapsed());
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(code)
}

/// Parses the pair list and runs `get_rate` under `deadline`
async fn execute(
    service: &DynQuoteService,
    args: &QuoteArgs,
    deadline: Duration,
) -> Result<QuoteResponse, DomainError> {
    let pairs = parse_pair_list(&args.pairs)?;

    tokio::time::timeout(deadline, service.get_rate(&args.api_key, &pairs))
        .await
        .map_err(|_| {
            DomainError::internal(format!("Quote timed out after {}ms", deadline.as_millis()))
        })?
}

fn render(result: Result<QuoteResponse, DomainError>, took: Duration) -> (serde_json::Value, ExitCode) {
    match result {
        Ok(response) => {
            let output = QuoteOutput {
                rates: response.rates,
                took: took.as_millis() as u64,
            };
            (json!(output), ExitCode::SUCCESS)
        }
        Err(e) => (
            json!({ "error": e.to_string(), "kind": e.kind().to_string() }),
            ExitCode::FAILURE,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::domain::{ApiKeyTier, CacheExt, CachedRate, CurrencyPair};
    use crate::infrastructure::api_key::{ApiKeySeed, StoreConfig};

    fn args(pairs: &str) -> QuoteArgs {
        QuoteArgs {
            api_key: "demo".to_string(),
            pairs: pairs.to_string(),
        }
    }

    async fn service() -> DynQuoteService {
        let config = AppConfig {
            store: StoreConfig {
                api_keys: vec![ApiKeySeed {
                    api_key_id: "demo".to_string(),
                    user_id: "user-1".to_string(),
                    tier: ApiKeyTier::Unlimited,
                }],
                ..Default::default()
            },
            ..Default::default()
        };

        let cache = crate::create_cache(&config).await.unwrap();
        cache
            .set(
                "rate_usd_jpy",
                &CachedRate { rate: 150.25, timestamp: 1_700_000_000 },
                Duration::from_secs(600),
            )
            .await
            .unwrap();

        crate::create_quote_service(&config, cache).await.unwrap()
    }

    #[tokio::test]
    async fn test_execute_returns_rates() {
        let service = service().await;

        let response = execute(&service, &args(" USD_JPY ,"), Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(response.rates.len(), 1);
        assert_eq!(response.rates[0].pair, CurrencyPair::new("USD", "JPY"));
    }

    #[tokio::test]
    async fn test_execute_rejects_malformed_pairs() {
        let service = service().await;

        let err = execute(&service, &args("USDJPY"), Duration::from_secs(1))
            .await
            .unwrap_err();

        assert_eq!(err.kind().to_string(), "invalid_parameter");
    }

    #[test]
    fn test_render_success_shape() {
        let response = QuoteResponse {
            rates: vec![RateResult::new(
                CurrencyPair::new("USD", "JPY"),
                CachedRate { rate: 150.25, timestamp: 1_700_000_000 },
            )],
        };

        let (output, code) = render(Ok(response), Duration::from_millis(7));

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(
            output,
            json!({
                "rates": [{ "pair": "USD_JPY", "rate": 150.25, "timestamp": 1_700_000_000 }],
                "took": 7
            })
        );
    }

    #[test]
    fn test_render_error_includes_kind() {
        let (output, code) = render(
            Err(DomainError::not_found("No rate available for EUR_USD")),
            Duration::ZERO,
        );

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(output["kind"], "not_found");
        assert!(output["error"].as_str().unwrap().contains("EUR_USD"));
    }
}
