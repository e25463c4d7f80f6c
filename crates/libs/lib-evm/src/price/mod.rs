//! # Token Price Client
//!
//! USD spot prices from the Moralis EVM API:
//! `GET {api_base}/erc20/{address}/price?chain={chain}&include=percent_change`
//! authenticated with the `X-API-Key` header.
//!
//! The native sentinel address has no price of its own; callers map it with
//! [`price_lookup_address`](crate::price_lookup_address) first.

pub mod types;

use crate::error::{check_status, UpstreamError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub use types::TokenPriceResponse;

const DEFAULT_API_BASE: &str = "https://deep-index.moralis.io/api/v2.2";
const DEFAULT_CHAIN: &str = "0x89";

/// Source of USD token prices.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// USD price of one whole unit of the token at `address`.
    async fn usd_price(&self, address: &str) -> Result<f64, UpstreamError>;
}

/// Builder for configuring [`PriceClient`].
#[derive(Debug, Clone, Default)]
pub struct PriceClientBuilder {
    api_base: Option<String>,
    api_key: Option<String>,
    chain: Option<String>,
    timeout: Option<Duration>,
}

impl PriceClientBuilder {
    pub fn api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = Some(url.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Hex chain identifier, e.g. `0x89` for Polygon.
    pub fn chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> anyhow::Result<PriceClient> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(PriceClient {
            http,
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: self.api_key.unwrap_or_default(),
            chain: self.chain.unwrap_or_else(|| DEFAULT_CHAIN.to_string()),
        })
    }
}

/// Client for the Moralis token price endpoint
pub struct PriceClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    chain: String,
}

impl PriceClient {
    pub fn builder() -> PriceClientBuilder {
        PriceClientBuilder::default()
    }

    /// Full price response for a token.
    pub async fn token_price(&self, address: &str) -> Result<TokenPriceResponse, UpstreamError> {
        let url = format!("{}/erc20/{}/price", self.api_base, address);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("X-API-Key", &self.api_key)
            .query(&[("chain", self.chain.as_str()), ("include", "percent_change")])
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<TokenPriceResponse>().await?)
    }
}

#[async_trait]
impl PriceOracle for PriceClient {
    async fn usd_price(&self, address: &str) -> Result<f64, UpstreamError> {
        Ok(self.token_price(address).await?.usd_price)
    }
}
