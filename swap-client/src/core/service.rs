//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability.

use async_trait::async_trait;
use shared::{AllowanceData, QuoteData, SpenderData, SwapData, Token, TokenPrices, TransactionData};

use super::error::Result;

/// Parameters of a swap transaction request.
#[derive(Debug, Clone, PartialEq)]
pub struct SwapRequest {
    pub chain_id: u64,
    /// Source token address
    pub src: String,
    /// Destination token address
    pub dst: String,
    /// Raw source amount (smallest unit)
    pub amount: String,
    /// Wallet that will send the transaction
    pub from: String,
    /// Slippage tolerance in percent
    pub slippage: f64,
}

/// Proxy API operations used by the client.
///
/// Implemented by [`ApiClient`](crate::services::api::ApiClient); tests use
/// in-memory fakes.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// USD prices of a pair and their ratio
    async fn token_prices(&self, address_one: &str, address_two: &str) -> Result<TokenPrices>;

    /// Swappable tokens on `chain_id`
    async fn tokens(&self, chain_id: u64) -> Result<Vec<Token>>;

    /// Router contract that must be approved
    async fn spender(&self, chain_id: u64) -> Result<SpenderData>;

    /// Allowance granted by `wallet_address` to the router for `token_address`
    async fn allowance(&self, chain_id: u64, token_address: &str, wallet_address: &str) -> Result<AllowanceData>;

    /// Unsigned approval of `amount` raw units
    async fn approve_transaction(&self, chain_id: u64, token_address: &str, amount: &str) -> Result<TransactionData>;

    /// Unsigned swap transaction and expected output
    async fn swap(&self, request: &SwapRequest) -> Result<SwapData>;

    /// Expected output only
    async fn quote(&self, chain_id: u64, src: &str, dst: &str, amount: &str) -> Result<QuoteData>;
}
