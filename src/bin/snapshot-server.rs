use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use erc20_snapshot::chain::AlloyChainReader;
use erc20_snapshot::config::Config;
use erc20_snapshot::snapshot::SnapshotFetcher;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Initialize structured logging (set RUST_LOG=info for output)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    tracing::info!("ERC-20 snapshot server starting");

    let config_path = std::env::args().nth(1);
    let config = Config::load_or_default(config_path.as_deref())?;
    let target = config.target()?;
    tracing::info!(
        rpc = %target.rpc_url,
        contract = %target.contract,
        timeout_secs = config.rpc.timeout_secs,
        "Configuration loaded from {}",
        config_path.as_deref().unwrap_or("built-in defaults")
    );

    let reader = AlloyChainReader::connect_http(&target.rpc_url)?;
    let fetcher = SnapshotFetcher::new(Arc::new(reader), target, config.timeout());

    let shutdown = CancellationToken::new();
    let mut server = {
        let shutdown = shutdown.clone();
        let api = config.api.clone();
        tokio::spawn(async move {
            erc20_snapshot::api::serve(fetcher, &api.host, api.port, &api.mount_path, shutdown)
                .await
        })
    };

    tracing::info!("Press Ctrl+C to stop.");

    tokio::select! {
        // Server exited on its own, e.g. the listen address was unavailable
        result = &mut server => {
            result??;
        }
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Shutdown signal received, stopping server...");
            shutdown.cancel();
            server.await??;
        }
    }

    tracing::info!("ERC-20 snapshot server stopped gracefully");
    Ok(())
}
