//! # Token List Handler
//!
//! - `GET /tokens?chainId` - aggregator token list as `{ticker, name, img, address, decimals}`
//!
//! Only the tail of the upstream list is served, starting at `TOKEN_LIST_OFFSET`
//! (74 by default).

use axum::{
    extract::{Query, State},
    Json,
};
use lib_core::Result;
use lib_evm::aggregator::ChainParams;
use shared::{ApiResponse, Token};
use tracing::instrument;

use crate::server::AppState;
use crate::services::AggregatorService;

#[instrument(skip(state))]
pub async fn get_tokens(
    State(state): State<AppState>,
    Query(params): Query<ChainParams>,
) -> Result<Json<ApiResponse<Vec<Token>>>> {
    let service = AggregatorService::new(state.aggregator, state.config);
    let tokens = service.tokens(params.chain_id.as_deref()).await?;
    Ok(Json(ApiResponse::ok(tokens)))
}
