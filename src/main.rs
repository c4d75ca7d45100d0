use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use erc20_snapshot::chain::AlloyChainReader;
use erc20_snapshot::config::Config;
use erc20_snapshot::report;
use erc20_snapshot::snapshot::SnapshotFetcher;

#[tokio::main]
async fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;

    // Logs go to stderr; stdout carries the report (set RUST_LOG=debug for RPC detail)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    // Optional config file; built-in mainnet USDT defaults otherwise
    let config_path = std::env::args().nth(1);
    let config = Config::load_or_default(config_path.as_deref())?;
    let target = config.target()?;
    tracing::debug!(
        rpc = %target.rpc_url,
        contract = %target.contract,
        timeout_secs = config.rpc.timeout_secs,
        "Configuration loaded"
    );

    let reader = AlloyChainReader::connect_http(&target.rpc_url)?;
    let fetcher = SnapshotFetcher::new(Arc::new(reader), target, config.timeout());

    let envelope = report::run(&fetcher, &mut std::io::stdout(), &mut std::io::stderr()).await?;

    Ok(if envelope.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
