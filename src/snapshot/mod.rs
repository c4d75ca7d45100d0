mod types;
mod units;

use alloy::primitives::Address;
use std::sync::Arc;
use std::time::Duration;

use crate::chain::{ChainReader, NetworkInfo};
use crate::error::SnapshotError;

pub use types::{ContractInfo, ContractSnapshot, SampleBalance, SnapshotEnvelope, TokenMetadata};
pub use units::format_units;

/// Where to read from: the endpoint, the token contract and the holder whose balance is sampled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotTarget {
    pub rpc_url: String,
    pub contract: Address,
    pub sample_holder: Address,
}

/// Progress hook. `requesting_*` fires before a read is sent, the other
/// methods once its result is in, so a failure shows which stage stopped.
pub trait SnapshotObserver: Send {
    fn connecting(&mut self, _rpc_url: &str) {}
    fn requesting_network(&mut self) {}
    fn network(&mut self, _network: &NetworkInfo) {}
    fn requesting_block_number(&mut self) {}
    fn block_number(&mut self, _block_number: u64) {}
    fn binding_contract(&mut self, _contract: Address) {}
    fn requesting_token_metadata(&mut self) {}
    fn token_metadata(&mut self, _metadata: &TokenMetadata) {}
    fn requesting_sample_balance(&mut self, _holder: Address) {}
    fn sample_balance(&mut self, _balance: &SampleBalance) {}
}

pub struct NoopObserver;

impl SnapshotObserver for NoopObserver {}

/// Read network identity, the latest block, the token's view values and one
/// balance, then assemble them into a [`ContractSnapshot`].
///
/// The four contract-level reads are independent and run concurrently. The
/// first failing read aborts the snapshot; nothing partial is returned.
pub async fn fetch_snapshot(
    reader: &dyn ChainReader,
    target: &SnapshotTarget,
    observer: &mut dyn SnapshotObserver,
) -> Result<ContractSnapshot, SnapshotError> {
    observer.connecting(&target.rpc_url);

    observer.requesting_network();
    let network = reader.network().await?;
    tracing::debug!(network = %network.name, chain_id = network.chain_id, "Connected to network");
    observer.network(&network);

    observer.requesting_block_number();
    let block_number = reader.block_number().await?;
    tracing::debug!(block_number, "Latest block");
    observer.block_number(block_number);

    let contract = target.contract;
    observer.binding_contract(contract);

    observer.requesting_token_metadata();
    let (name, symbol, decimals, total_supply) = futures::try_join!(
        reader.token_name(contract),
        reader.token_symbol(contract),
        reader.token_decimals(contract),
        reader.total_supply(contract),
    )?;

    let metadata = TokenMetadata {
        name,
        symbol,
        decimals,
        total_supply: format_units(total_supply, decimals),
    };
    observer.token_metadata(&metadata);

    observer.requesting_sample_balance(target.sample_holder);
    let balance = reader.balance_of(contract, target.sample_holder).await?;
    let sample_balance = SampleBalance {
        address: target.sample_holder.to_checksum(None),
        balance: format_units(balance, decimals),
    };
    observer.sample_balance(&sample_balance);

    let TokenMetadata {
        name,
        symbol,
        decimals,
        total_supply,
    } = metadata;

    Ok(ContractSnapshot {
        network,
        block_number,
        contract: ContractInfo {
            address: contract.to_checksum(None),
            name,
            symbol,
            decimals,
            total_supply,
            sample_balance,
        },
    })
}

/// A reader, a target and the deadline every snapshot must meet.
///
/// Both entry points share one of these; the timeout covers the whole
/// snapshot, not individual requests.
#[derive(Clone)]
pub struct SnapshotFetcher {
    reader: Arc<dyn ChainReader>,
    target: SnapshotTarget,
    timeout: Duration,
}

impl SnapshotFetcher {
    pub fn new(reader: Arc<dyn ChainReader>, target: SnapshotTarget, timeout: Duration) -> Self {
        Self {
            reader,
            target,
            timeout,
        }
    }

    pub async fn fetch(&self) -> Result<ContractSnapshot, SnapshotError> {
        self.fetch_observed(&mut NoopObserver).await
    }

    pub async fn fetch_observed(
        &self,
        observer: &mut dyn SnapshotObserver,
    ) -> Result<ContractSnapshot, SnapshotError> {
        let fetch = fetch_snapshot(self.reader.as_ref(), &self.target, observer);
        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(SnapshotError::provider(
                "snapshot",
                format!("request timed out after {:?}", self.timeout),
            )),
        }
    }
}
