//! # Swap Aggregator Client
//!
//! Integration with the 1inch Swap API (v6.0): router spender, token
//! allowances, approval transactions, quotes, swap transactions and the token
//! list.
//!
//! Every endpoint lives under `{api_base}/{chainId}/` and requires
//! `Authorization: Bearer <token>`. Response bodies are returned unchanged as
//! JSON, except for the token list which is reshaped into [`UpstreamToken`]s.

// region: --- Modules
pub mod client;
pub mod types;
// endregion: --- Modules

use crate::error::UpstreamError;
use async_trait::async_trait;
use client::AggregatorHttpClient;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

pub use types::*;

const DEFAULT_API_BASE: &str = "https://api.1inch.dev/swap/v6.0";

// region: --- Trait

/// The aggregator operations the proxy forwards.
///
/// Implemented by [`AggregatorClient`]; tests substitute in-memory fakes.
#[async_trait]
pub trait SwapAggregator: Send + Sync {
    /// `GET /approve/spender` - router contract address
    async fn spender(&self, chain_id: &str) -> Result<Value, UpstreamError>;

    /// `GET /approve/allowance` - current allowance for (token, wallet)
    async fn allowance(&self, chain_id: &str, params: &AllowanceParams) -> Result<Value, UpstreamError>;

    /// `GET /approve/transaction` - unsigned approval transaction
    async fn approve_transaction(&self, chain_id: &str, params: &ApproveParams) -> Result<Value, UpstreamError>;

    /// `GET /swap` - unsigned swap transaction
    async fn swap(&self, chain_id: &str, params: &SwapParams) -> Result<Value, UpstreamError>;

    /// `GET /quote` - expected output amount
    async fn quote(&self, chain_id: &str, params: &QuoteParams) -> Result<Value, UpstreamError>;

    /// `GET /tokens` - token list, in upstream order
    async fn tokens(&self, chain_id: &str) -> Result<Vec<UpstreamToken>, UpstreamError>;
}

// endregion: --- Trait

// region: --- Builder

/// Builder for configuring [`AggregatorClient`].
#[derive(Debug, Clone, Default)]
pub struct AggregatorClientBuilder {
    api_base: Option<String>,
    auth_token: Option<String>,
    timeout: Option<Duration>,
}

impl AggregatorClientBuilder {
    /// Set the API base URL (without chain id).
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    /// Set the bearer token.
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the HTTP request timeout. Without it reqwest's default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client with configured settings.
    pub fn build(self) -> anyhow::Result<AggregatorClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        let api_base = self.api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let inner = AggregatorHttpClient {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            auth_token: self.auth_token.unwrap_or_default(),
        };

        Ok(AggregatorClient { inner })
    }
}

// endregion: --- Builder

// region: --- Main Client

/// Client for the 1inch Swap API
pub struct AggregatorClient {
    inner: AggregatorHttpClient,
}

impl AggregatorClient {
    /// Create a new aggregator client using a builder for configuration.
    ///
    /// ```rust,no_run
    /// use lib_evm::AggregatorClient;
    ///
    /// let client = AggregatorClient::builder()
    ///     .auth_token("my-token")
    ///     .timeout(std::time::Duration::from_secs(15))
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn builder() -> AggregatorClientBuilder {
        AggregatorClientBuilder::default()
    }
}

#[async_trait]
impl SwapAggregator for AggregatorClient {
    async fn spender(&self, chain_id: &str) -> Result<Value, UpstreamError> {
        self.inner.get_json(chain_id, "approve/spender", &[] as &[(&str, &str)]).await
    }

    async fn allowance(&self, chain_id: &str, params: &AllowanceParams) -> Result<Value, UpstreamError> {
        self.inner.get_json(chain_id, "approve/allowance", params).await
    }

    async fn approve_transaction(&self, chain_id: &str, params: &ApproveParams) -> Result<Value, UpstreamError> {
        self.inner.get_json(chain_id, "approve/transaction", params).await
    }

    async fn swap(&self, chain_id: &str, params: &SwapParams) -> Result<Value, UpstreamError> {
        self.inner.get_json(chain_id, "swap", params).await
    }

    async fn quote(&self, chain_id: &str, params: &QuoteParams) -> Result<Value, UpstreamError> {
        self.inner.get_json(chain_id, "quote", params).await
    }

    async fn tokens(&self, chain_id: &str) -> Result<Vec<UpstreamToken>, UpstreamError> {
        let list: TokenListResponse = self
            .inner
            .get_json(chain_id, "tokens", &[] as &[(&str, &str)])
            .await?;

        // Malformed entries are skipped, the rest keep upstream order
        Ok(list
            .tokens
            .into_iter()
            .filter_map(|(key, token)| match serde_json::from_value::<UpstreamToken>(token) {
                Ok(token) => Some(token),
                Err(e) => {
                    warn!(token = %key, error = %e, "Skipping undecodable token list entry");
                    None
                }
            })
            .collect())
    }
}

// endregion: --- Main Client
