//! # Swap Endpoints

use serde::Serialize;
use shared::{QuoteData, SwapData};

use super::client::ApiClient;
use crate::core::error::Result;
use crate::core::service::SwapRequest;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SwapQuery<'a> {
    chain_id: u64,
    src: &'a str,
    dst: &'a str,
    amount: &'a str,
    from: &'a str,
    slippage: f64,
}

/// Build a swap transaction.
#[tracing::instrument(skip(client), fields(src = %request.src, dst = %request.dst, amount = %request.amount))]
pub async fn get_swap(client: &ApiClient, request: &SwapRequest) -> Result<SwapData> {
    tracing::info!("Requesting swap transaction");

    let query = SwapQuery {
        chain_id: request.chain_id,
        src: &request.src,
        dst: &request.dst,
        amount: &request.amount,
        from: &request.from,
        slippage: request.slippage,
    };

    client.get_envelope("/call/swap", &query).await
}

pub async fn get_quote(client: &ApiClient, chain_id: u64, src: &str, dst: &str, amount: &str) -> Result<QuoteData> {
    let chain_id = chain_id.to_string();
    client
        .get_envelope(
            "/quote",
            &[("chainId", chain_id.as_str()), ("src", src), ("dst", dst), ("amount", amount)],
        )
        .await
}
