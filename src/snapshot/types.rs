use serde::Serialize;

use crate::chain::NetworkInfo;
use crate::error::SnapshotError;

/// Everything read from the chain in one snapshot. Built once, serialized, dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractSnapshot {
    pub network: NetworkInfo,
    pub block_number: u64,
    pub contract: ContractInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractInfo {
    /// EIP-55 checksummed.
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Scaled by `decimals`, see [`super::format_units`].
    pub total_supply: String,
    pub sample_balance: SampleBalance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleBalance {
    pub address: String,
    pub balance: String,
}

/// The four contract-level view values, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: String,
}

/// `{"success": true, "data": ...}` or `{"success": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> SnapshotEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T> From<Result<T, SnapshotError>> for SnapshotEnvelope<T> {
    fn from(result: Result<T, SnapshotError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}
