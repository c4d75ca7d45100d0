use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::{RpcError, TransportError};
use alloy_chains::NamedChain;
use async_trait::async_trait;

use super::erc20::ERC20;
use super::{ChainReader, NetworkInfo};
use crate::error::SnapshotError;

/// [`ChainReader`] backed by an alloy HTTP provider.
#[derive(Clone)]
pub struct AlloyChainReader {
    provider: DynProvider,
}

impl AlloyChainReader {
    /// Build a reader for `rpc_url`. No request is sent until the first read.
    pub fn connect_http(rpc_url: &str) -> eyre::Result<Self> {
        let url = rpc_url
            .parse()
            .map_err(|e| eyre::eyre!("Invalid RPC URL '{}': {}", rpc_url, e))?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self { provider })
    }

    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl ChainReader for AlloyChainReader {
    async fn network(&self) -> Result<NetworkInfo, SnapshotError> {
        let chain_id = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| transport_error("eth_chainId", e))?;
        Ok(NetworkInfo {
            name: chain_name(chain_id),
            chain_id,
        })
    }

    async fn block_number(&self) -> Result<u64, SnapshotError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| transport_error("eth_blockNumber", e))
    }

    async fn token_name(&self, token: Address) -> Result<String, SnapshotError> {
        ERC20::new(token, &self.provider)
            .name()
            .call()
            .await
            .map_err(|e| call_error("name", e))
    }

    async fn token_symbol(&self, token: Address) -> Result<String, SnapshotError> {
        ERC20::new(token, &self.provider)
            .symbol()
            .call()
            .await
            .map_err(|e| call_error("symbol", e))
    }

    async fn token_decimals(&self, token: Address) -> Result<u8, SnapshotError> {
        ERC20::new(token, &self.provider)
            .decimals()
            .call()
            .await
            .map_err(|e| call_error("decimals", e))
    }

    async fn total_supply(&self, token: Address) -> Result<U256, SnapshotError> {
        ERC20::new(token, &self.provider)
            .totalSupply()
            .call()
            .await
            .map_err(|e| call_error("totalSupply", e))
    }

    async fn balance_of(&self, token: Address, holder: Address) -> Result<U256, SnapshotError> {
        ERC20::new(token, &self.provider)
            .balanceOf(holder)
            .call()
            .await
            .map_err(|e| call_error("balanceOf", e))
    }
}

/// Registry name of a chain ID, `"unknown"` for chains alloy does not know.
pub fn chain_name(chain_id: u64) -> String {
    NamedChain::try_from(chain_id)
        .map(|chain| chain.to_string())
        .unwrap_or_else(|_| "unknown".to_string())
}

fn transport_error(method: &str, err: TransportError) -> SnapshotError {
    tracing::debug!(method, error = %err, "RPC request failed");
    SnapshotError::provider(method, err)
}

/// An error response from the node means the call itself failed (revert);
/// any other transport failure means the node was never properly reached.
fn call_error(function: &str, err: alloy::contract::Error) -> SnapshotError {
    tracing::debug!(function, error = %err, "Contract call failed");
    match err {
        alloy::contract::Error::TransportError(RpcError::ErrorResp(payload)) => {
            SnapshotError::contract_call(
                function,
                format!("{} (code {})", payload.message, payload.code),
            )
        }
        alloy::contract::Error::TransportError(e) => {
            SnapshotError::provider(format!("eth_call {}()", function), e)
        }
        other => SnapshotError::contract_call(function, other),
    }
}
