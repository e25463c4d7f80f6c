//! # Approval Endpoints

use shared::{AllowanceData, SpenderData, TransactionData};

use super::client::ApiClient;
use crate::core::error::Result;

pub async fn get_spender(client: &ApiClient, chain_id: u64) -> Result<SpenderData> {
    client.get_envelope("/approve/spender", &[("chainId", chain_id)]).await
}

pub async fn get_allowance(
    client: &ApiClient,
    chain_id: u64,
    token_address: &str,
    wallet_address: &str,
) -> Result<AllowanceData> {
    let chain_id = chain_id.to_string();
    client
        .get_envelope(
            "/approve/allowance",
            &[
                ("chainId", chain_id.as_str()),
                ("tokenAddress", token_address),
                ("walletAddress", wallet_address),
            ],
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn get_approve_transaction(
    client: &ApiClient,
    chain_id: u64,
    token_address: &str,
    amount: &str,
) -> Result<TransactionData> {
    let chain_id = chain_id.to_string();
    client
        .get_envelope(
            "/approve/transaction",
            &[
                ("chainId", chain_id.as_str()),
                ("tokenAddress", token_address),
                ("amount", amount),
            ],
        )
        .await
}
