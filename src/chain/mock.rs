use std::time::Duration;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use super::{ChainReader, NetworkInfo};
use crate::error::SnapshotError;

/// Canned [`ChainReader`] returning fixed values, optionally failing one read.
#[derive(Debug, Clone)]
pub struct MockReader {
    pub network: NetworkInfo,
    pub block_number: u64,
    pub name: String,
    pub symbol: String,
    pub decimals: Result<u8, SnapshotError>,
    pub total_supply: U256,
    pub balance: U256,
    pub unreachable: bool,
    pub delay: Option<Duration>,
}

impl MockReader {
    /// Tether on mainnet with 1,000,000 tokens supplied and 0.5 held by the sample address.
    pub fn tether() -> Self {
        Self {
            network: NetworkInfo {
                name: "mainnet".to_string(),
                chain_id: 1,
            },
            block_number: 21_000_000,
            name: "Tether USD".to_string(),
            symbol: "USDT".to_string(),
            decimals: Ok(6),
            total_supply: U256::from(1_000_000_000_000u64),
            balance: U256::from(500_000u64),
            unreachable: false,
            delay: None,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::tether()
        }
    }

    pub fn malformed_decimals() -> Self {
        Self {
            decimals: Err(SnapshotError::contract_call(
                "decimals",
                "could not decode return data as uint8",
            )),
            ..Self::tether()
        }
    }

    fn reachable(&self, method: &str) -> Result<(), SnapshotError> {
        if self.unreachable {
            return Err(SnapshotError::provider(
                method,
                "error sending request: Connection refused (os error 111)",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainReader for MockReader {
    async fn network(&self) -> Result<NetworkInfo, SnapshotError> {
        self.reachable("eth_chainId")?;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.network.clone())
    }

    async fn block_number(&self) -> Result<u64, SnapshotError> {
        self.reachable("eth_blockNumber")?;
        Ok(self.block_number)
    }

    async fn token_name(&self, _token: Address) -> Result<String, SnapshotError> {
        self.reachable("eth_call name()")?;
        Ok(self.name.clone())
    }

    async fn token_symbol(&self, _token: Address) -> Result<String, SnapshotError> {
        self.reachable("eth_call symbol()")?;
        Ok(self.symbol.clone())
    }

    async fn token_decimals(&self, _token: Address) -> Result<u8, SnapshotError> {
        self.reachable("eth_call decimals()")?;
        self.decimals.clone()
    }

    async fn total_supply(&self, _token: Address) -> Result<U256, SnapshotError> {
        self.reachable("eth_call totalSupply()")?;
        Ok(self.total_supply)
    }

    async fn balance_of(&self, _token: Address, _holder: Address) -> Result<U256, SnapshotError> {
        self.reachable("eth_call balanceOf()")?;
        Ok(self.balance)
    }
}
