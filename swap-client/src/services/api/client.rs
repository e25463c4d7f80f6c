//! # API Client
//!
//! HTTP client for the swap proxy.

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{AllowanceData, ApiResponse, QuoteData, SpenderData, SwapData, Token, TokenPrices, TransactionData};

use crate::core::error::{ClientError, Result};
use crate::core::service::{ApiService, SwapRequest};

/// Default proxy address
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3300";

/// HTTP client for the swap proxy.
///
/// No timeout is configured; reqwest's defaults apply.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET an enveloped endpoint and unwrap its `data`.
    ///
    /// The proxy answers failures with HTTP 500 and `{success: false, error}`;
    /// that message becomes the `ClientError::Api` text.
    pub(crate) async fn get_envelope<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.get(self.url(path)).query(query).send().await?;
        let status = response.status();

        let envelope = response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| ClientError::Api(format!("Failed to parse response ({}): {}", status, e)))?;

        envelope.into_result().map_err(ClientError::Api)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_PROXY_URL)
    }
}

#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn token_prices(&self, address_one: &str, address_two: &str) -> Result<TokenPrices> {
        super::prices::get_token_prices(self, address_one, address_two).await
    }

    async fn tokens(&self, chain_id: u64) -> Result<Vec<Token>> {
        super::tokens::get_tokens(self, chain_id).await
    }

    async fn spender(&self, chain_id: u64) -> Result<SpenderData> {
        super::approve::get_spender(self, chain_id).await
    }

    async fn allowance(&self, chain_id: u64, token_address: &str, wallet_address: &str) -> Result<AllowanceData> {
        super::approve::get_allowance(self, chain_id, token_address, wallet_address).await
    }

    async fn approve_transaction(&self, chain_id: u64, token_address: &str, amount: &str) -> Result<TransactionData> {
        super::approve::get_approve_transaction(self, chain_id, token_address, amount).await
    }

    async fn swap(&self, request: &SwapRequest) -> Result<SwapData> {
        super::swap::get_swap(self, request).await
    }

    async fn quote(&self, chain_id: u64, src: &str, dst: &str, amount: &str) -> Result<QuoteData> {
        super::swap::get_quote(self, chain_id, src, dst, amount).await
    }
}
