pub mod erc20;
#[cfg(test)]
pub(crate) mod mock;
pub mod provider;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use serde::Serialize;

use crate::error::SnapshotError;

pub use provider::AlloyChainReader;

/// Identity of the network an endpoint is serving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub name: String,
    pub chain_id: u64,
}

/// The read-only capabilities a snapshot needs from an Ethereum node.
///
/// `AlloyChainReader` talks to a real JSON-RPC endpoint; tests substitute a
/// canned implementation.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn network(&self) -> Result<NetworkInfo, SnapshotError>;
    async fn block_number(&self) -> Result<u64, SnapshotError>;
    async fn token_name(&self, token: Address) -> Result<String, SnapshotError>;
    async fn token_symbol(&self, token: Address) -> Result<String, SnapshotError>;
    async fn token_decimals(&self, token: Address) -> Result<u8, SnapshotError>;
    async fn total_supply(&self, token: Address) -> Result<U256, SnapshotError>;
    async fn balance_of(&self, token: Address, holder: Address) -> Result<U256, SnapshotError>;
}
