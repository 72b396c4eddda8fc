//! CLI module for the fxnow gateway
//!
//! Provides subcommands:
//! - `update`: run the rate updater until interrupted
//! - `quote`: serve one quote read and print it as JSON

pub mod quote;
pub mod update;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// fxnow - rate-limited currency quotes served from a cache
#[derive(Parser)]
#[command(name = "fxnow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Refresh the rate cache from the upstream source on a timer
    Update,

    /// Read quotes for a list of currency pairs
    Quote(quote::QuoteArgs),
}

/// Loads `.env` and the layered configuration, then installs logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from(["fxnow", "update"]).unwrap();
        assert!(matches!(cli.command, Command::Update));
    }

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from([
            "fxnow",
            "quote",
            "--api-key",
            "demo",
            "--pairs",
            "USD_JPY,EUR_USD",
        ])
        .unwrap();

        match cli.command {
            Command::Quote(args) => {
                assert_eq!(args.api_key, "demo");
                assert_eq!(args.pairs, "USD_JPY,EUR_USD");
            }
            Command::Update => panic!("expected quote command"),
        }
    }

    #[test]
    fn test_quote_requires_pairs() {
        assert!(Cli::try_parse_from(["fxnow", "quote", "--api-key", "demo"]).is_err());
    }
}
