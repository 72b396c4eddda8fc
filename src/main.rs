use std::process::ExitCode;

use clap::Parser;
use fxnow_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Update => cli::update::run().await.map(|_| ExitCode::SUCCESS),
        Command::Quote(args) => cli::quote::run(args).await,
    }
}
