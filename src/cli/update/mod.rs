//! Update command - runs the rate updater until shutdown

use std::sync::Arc;

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::infrastructure::observability::init_metrics;

/// Run the updater until Ctrl+C or SIGTERM
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    init_metrics(&config.metrics);

    let cache = crate::create_cache(&config).await?;
    let updater = Arc::new(crate::create_quote_updater(&config, cache)?);

    let cancel = CancellationToken::new();
    let handle = updater.spawn(cancel.clone());

    shutdown_signal().await?;
    cancel.cancel();
    handle.await?;

    info!("Updater shutdown complete");
    Ok(())
}

async fn shutdown_signal() -> anyhow::Result<()> {
    #[cfg(unix)]
    let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())?;

    #[cfg(unix)]
    let terminate = terminate.recv();

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Option<()>>();

    tokio::select! {
        result = signal::ctrl_c() => {
            result?;
            info!("Received Ctrl+C, stopping updater");
        }
        _ = terminate => {
            info!("Received SIGTERM, stopping updater");
        }
    }

    Ok(())
}
