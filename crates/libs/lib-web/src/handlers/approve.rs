//! # Approval Handlers
//!
//! Passthroughs for the token approval flow. Each one answers
//! `{success: true, data: <upstream body>}`.
//!
//! - `GET /approve/spender?chainId` - router address to approve
//! - `GET /approve/allowance?chainId&tokenAddress&walletAddress` - current allowance
//! - `GET /approve/transaction?chainId&tokenAddress&amount` - unsigned approval transaction

use axum::{
    extract::{Query, State},
    Json,
};
use lib_core::Result;
use lib_evm::aggregator::{AllowanceParams, ApproveParams, ChainParams};
use serde_json::Value;
use shared::ApiResponse;
use tracing::instrument;

use crate::server::AppState;
use crate::services::AggregatorService;

#[instrument(skip(state))]
pub async fn get_spender(
    State(state): State<AppState>,
    Query(params): Query<ChainParams>,
) -> Result<Json<ApiResponse<Value>>> {
    let service = AggregatorService::new(state.aggregator, state.config);
    let data = service.spender(params.chain_id.as_deref()).await?;
    Ok(Json(ApiResponse::ok(data)))
}

#[instrument(skip(state))]
pub async fn get_allowance(
    State(state): State<AppState>,
    Query(params): Query<AllowanceParams>,
) -> Result<Json<ApiResponse<Value>>> {
    let service = AggregatorService::new(state.aggregator, state.config);
    let data = service.allowance(&params).await?;
    Ok(Json(ApiResponse::ok(data)))
}

#[instrument(skip(state))]
pub async fn get_approve_transaction(
    State(state): State<AppState>,
    Query(params): Query<ApproveParams>,
) -> Result<Json<ApiResponse<Value>>> {
    let service = AggregatorService::new(state.aggregator, state.config);
    let data = service.approve_transaction(&params).await?;
    Ok(Json(ApiResponse::ok(data)))
}
