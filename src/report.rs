use alloy::primitives::Address;
use std::fmt;
use std::io::{self, Write};

use crate::chain::NetworkInfo;
use crate::snapshot::{
    ContractSnapshot, SampleBalance, SnapshotEnvelope, SnapshotFetcher, SnapshotObserver,
    TokenMetadata,
};

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Renders snapshot progress as the staged, human-readable CLI report.
///
/// Write failures are held until [`ConsoleReporter::finish`] so the
/// observer hooks stay infallible.
pub struct ConsoleReporter<W: Write> {
    out: W,
    symbol: String,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            symbol: String::new(),
            error: None,
        }
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            self.error = Some(e);
        }
    }

    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<W: Write + Send> SnapshotObserver for ConsoleReporter<W> {
    fn connecting(&mut self, rpc_url: &str) {
        self.line(format_args!("📡 Connecting to {}...", rpc_url));
    }

    fn requesting_network(&mut self) {
        self.line(format_args!("✅ Getting network information..."));
    }

    fn network(&mut self, network: &NetworkInfo) {
        self.line(format_args!("   Network: {}", network.name));
        self.line(format_args!("   Chain ID: {}", network.chain_id));
    }

    fn requesting_block_number(&mut self) {
        self.line(format_args!("\n📦 Getting latest block..."));
    }

    fn block_number(&mut self, block_number: u64) {
        self.line(format_args!("   Block Number: {}", block_number));
    }

    fn binding_contract(&mut self, contract: Address) {
        self.line(format_args!("\n🔗 Connecting to ERC-20 contract..."));
        self.line(format_args!("   Address: {}", contract.to_checksum(None)));
    }

    fn requesting_token_metadata(&mut self) {
        self.line(format_args!("\n📊 Retrieving contract data..."));
    }

    fn token_metadata(&mut self, metadata: &TokenMetadata) {
        self.symbol = metadata.symbol.clone();
        self.line(format_args!("   Name: {}", metadata.name));
        self.line(format_args!("   Symbol: {}", metadata.symbol));
        self.line(format_args!("   Decimals: {}", metadata.decimals));
        self.line(format_args!(
            "   Total Supply: {} {}",
            metadata.total_supply, metadata.symbol
        ));
    }

    fn requesting_sample_balance(&mut self, holder: Address) {
        self.line(format_args!("\n💰 Checking sample wallet balance..."));
        self.line(format_args!("   Address: {}", holder.to_checksum(None)));
    }

    fn sample_balance(&mut self, balance: &SampleBalance) {
        let symbol = self.symbol.clone();
        self.line(format_args!("   Balance: {} {}", balance.balance, symbol));
    }
}

/// Run one snapshot and print the full CLI report.
///
/// Progress and the final JSON envelope go to `out`; the error banner goes
/// to `err`. Returns the envelope that was printed.
pub async fn run<W, E>(
    fetcher: &SnapshotFetcher,
    out: &mut W,
    err: &mut E,
) -> io::Result<SnapshotEnvelope<ContractSnapshot>>
where
    W: Write + Send,
    E: Write,
{
    writeln!(out, "\n{}", rule())?;
    writeln!(out, "ERC-20 CONTRACT SNAPSHOT")?;
    writeln!(out, "{}\n", rule())?;

    let mut reporter = ConsoleReporter::new(&mut *out);
    let result = fetcher.fetch_observed(&mut reporter).await;
    reporter.finish()?;

    match &result {
        Ok(_) => {
            writeln!(out, "\n{}", rule())?;
            writeln!(out, "✅ SNAPSHOT COMPLETED SUCCESSFULLY!")?;
            writeln!(out, "{}\n", rule())?;
        }
        Err(e) => {
            tracing::error!(error = %e, "Snapshot failed");
            writeln!(err, "\n{}", rule())?;
            writeln!(err, "❌ ERROR OCCURRED")?;
            writeln!(err, "{}", rule())?;
            writeln!(err, "Message: {}", e)?;
            writeln!(err, "{}\n", rule())?;
        }
    }

    let envelope = SnapshotEnvelope::from(result);
    let json = serde_json::to_string_pretty(&envelope).map_err(io::Error::other)?;
    writeln!(out, "\n📋 JSON Response:")?;
    writeln!(out, "{}", json)?;
    out.flush()?;

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::mock::MockReader;
    use crate::config::Config;
    use std::sync::Arc;
    use std::time::Duration;

    fn fetcher(reader: MockReader) -> SnapshotFetcher {
        let target = Config::default().target().unwrap();
        SnapshotFetcher::new(Arc::new(reader), target, Duration::from_secs(10))
    }

    type Report = (SnapshotEnvelope<ContractSnapshot>, String, String);

    async fn run_to_strings(reader: MockReader) -> Report {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let envelope = run(&fetcher(reader), &mut out, &mut err).await.unwrap();
        (
            envelope,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn json_tail(out: &str) -> serde_json::Value {
        let (_, json) = out.split_once("📋 JSON Response:\n").unwrap();
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_success_report() {
        let (envelope, out, err) = run_to_strings(MockReader::tether()).await;

        assert!(envelope.success);
        assert!(err.is_empty());
        assert!(out.contains("   Network: mainnet"));
        assert!(out.contains("   Chain ID: 1"));
        assert!(out.contains("   Block Number: 21000000"));
        assert!(out.contains("   Total Supply: 1000000.0 USDT"));
        assert!(out.contains("   Balance: 0.5 USDT"));
        assert!(out.contains("SNAPSHOT COMPLETED SUCCESSFULLY"));

        let json = json_tail(&out);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["contract"]["symbol"], "USDT");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_report() {
        let (envelope, out, err) = run_to_strings(MockReader::unreachable()).await;

        assert!(!envelope.success);
        assert!(envelope.data.is_none());
        assert!(err.contains("ERROR OCCURRED"));
        assert!(err.contains("Message: provider error during eth_chainId"));
        assert!(!out.contains("SNAPSHOT COMPLETED"));

        // The stage that failed is announced before its read, with no result under it.
        assert!(out.contains("✅ Getting network information..."));
        assert!(!out.contains("   Network:"));
        assert!(!out.contains("Getting latest block"));

        let json = json_tail(&out);
        assert_eq!(json["success"], false);
        assert!(!json["error"].as_str().unwrap().is_empty());
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn test_malformed_decimals_report() {
        let (envelope, out, _) = run_to_strings(MockReader::malformed_decimals()).await;

        assert!(!envelope.success);
        assert!(out.contains("📊 Retrieving contract data..."));
        assert!(!out.contains("Total Supply"));
        assert!(!out.contains("Checking sample wallet balance"));
        let json = json_tail(&out);
        assert!(json["error"].as_str().unwrap().contains("decimals()"));
    }
}
