use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use super::AppState;
use crate::snapshot::{ContractSnapshot, SnapshotEnvelope};

type SnapshotResponse = Json<SnapshotEnvelope<ContractSnapshot>>;
type ApiResult<T> = Result<T, (StatusCode, SnapshotResponse)>;

fn api_error(status: StatusCode, msg: impl Into<String>) -> (StatusCode, SnapshotResponse) {
    (status, Json(SnapshotEnvelope::failure(msg)))
}

// ============================================================
// Snapshot
// ============================================================

pub async fn snapshot(State(state): State<Arc<AppState>>) -> ApiResult<SnapshotResponse> {
    let snapshot = state.fetcher.fetch().await.map_err(|e| {
        tracing::error!(error = %e, "Snapshot request failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    tracing::info!(
        chain_id = snapshot.network.chain_id,
        block = snapshot.block_number,
        contract = %snapshot.contract.address,
        symbol = %snapshot.contract.symbol,
        total_supply = %snapshot.contract.total_supply,
        sample_balance = %snapshot.contract.sample_balance.balance,
        "Contract data retrieved"
    );

    Ok(Json(SnapshotEnvelope::success(snapshot)))
}
