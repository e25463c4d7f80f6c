//! # Aggregator HTTP Client
//!
//! Thin reqwest wrapper that signs every call with the bearer token.

use crate::error::{check_status, UpstreamError};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// HTTP client wrapper for the 1inch Swap API
pub struct AggregatorHttpClient {
    pub http: Client,
    /// Base URL without the chain id, e.g. `https://api.1inch.dev/swap/v6.0`
    pub api_base: String,
    pub auth_token: String,
}

impl AggregatorHttpClient {
    /// `{api_base}/{chain_id}/{path}`
    pub fn url(&self, chain_id: &str, path: &str) -> String {
        format!("{}/{}/{}", self.api_base, chain_id, path)
    }

    /// GET a path under the chain, forwarding `query` as the query string.
    pub async fn get_json<Q, T>(&self, chain_id: &str, path: &str, query: &Q) -> Result<T, UpstreamError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(chain_id, path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.auth_token)
            .query(query)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}
