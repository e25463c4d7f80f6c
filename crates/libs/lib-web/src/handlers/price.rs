//! # Price Handler
//!
//! - `GET /tokenPrice?addressOne&addressTwo` - USD prices of a pair and their ratio
//!
//! ```bash
//! curl "http://localhost:3300/tokenPrice?addressOne=0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee&addressTwo=0x2791bca1f2de4661ed88a30c99a7a9449aa84174"
//! ```
//!
//! Response (not wrapped in the success envelope):
//! ```json
//! { "tokenOne": 0.52, "tokenTwo": 1.10, "ratio": 0.4727272727272727 }
//! ```

use axum::{
    extract::{Query, State},
    Json,
};
use lib_core::Result;
use lib_evm::PriceOracle;
use serde::Deserialize;
use shared::TokenPrices;
use std::sync::Arc;
use tracing::instrument;

use crate::services::PriceService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPriceQuery {
    pub address_one: Option<String>,
    pub address_two: Option<String>,
}

/// Fetch both USD prices concurrently and return their ratio.
///
/// Fails with HTTP 500 and `{success: false, error}` if either lookup fails;
/// no partial prices are returned.
#[instrument(skip(prices))]
pub async fn get_token_price(
    State(prices): State<Arc<dyn PriceOracle>>,
    Query(query): Query<TokenPriceQuery>,
) -> Result<Json<TokenPrices>> {
    let address_one = query.address_one.unwrap_or_default();
    let address_two = query.address_two.unwrap_or_default();

    let service = PriceService::new(prices);
    let token_prices = service.token_prices(&address_one, &address_two).await?;
    Ok(Json(token_prices))
}
