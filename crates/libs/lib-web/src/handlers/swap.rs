//! # Swap Handlers
//!
//! - `GET /call/swap?chainId&src&dst&amount&from&slippage` - unsigned swap transaction
//! - `GET /quote?chainId&src&dst&amount` - expected output, no transaction data
//!
//! ```bash
//! curl "http://localhost:3300/call/swap?chainId=137&src=0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee&dst=0x2791bca1f2de4661ed88a30c99a7a9449aa84174&amount=1000000000000000000&from=0x71c7656ec7ab88b098defb751b7401b5f6d8976f&slippage=2.5"
//! ```
//!
//! Response:
//! ```json
//! {
//!   "success": true,
//!   "data": {
//!     "dstAmount": "1090000",
//!     "tx": { "from": "0x71c7...", "to": "0x1111...", "data": "0x...", "value": "1000000000000000000", "gas": 250000, "gasPrice": "30000000000" }
//!   }
//! }
//! ```

use axum::{
    extract::{Query, State},
    Json,
};
use lib_core::Result;
use lib_evm::aggregator::{QuoteParams, SwapParams};
use serde_json::Value;
use shared::ApiResponse;
use tracing::instrument;

use crate::server::AppState;
use crate::services::AggregatorService;

/// Build a swap transaction with partial fills disabled.
#[instrument(skip(state))]
pub async fn get_swap(
    State(state): State<AppState>,
    Query(params): Query<SwapParams>,
) -> Result<Json<ApiResponse<Value>>> {
    let service = AggregatorService::new(state.aggregator, state.config);
    let data = service.swap(&params).await?;
    Ok(Json(ApiResponse::ok(data)))
}

#[instrument(skip(state))]
pub async fn get_quote(
    State(state): State<AppState>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<ApiResponse<Value>>> {
    let service = AggregatorService::new(state.aggregator, state.config);
    let data = service.quote(&params).await?;
    Ok(Json(ApiResponse::ok(data)))
}
