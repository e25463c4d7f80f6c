//! # Price Endpoint
//!
//! `/tokenPrice` is the one endpoint not wrapped in the success envelope.

use shared::{ErrorResponse, TokenPrices};

use super::client::ApiClient;
use crate::core::error::{ClientError, Result};

pub async fn get_token_prices(client: &ApiClient, address_one: &str, address_two: &str) -> Result<TokenPrices> {
    let response = client
        .client
        .get(client.url("/tokenPrice"))
        .query(&[("addressOne", address_one), ("addressTwo", address_two)])
        .send()
        .await?;

    if response.status().is_success() {
        response
            .json::<TokenPrices>()
            .await
            .map_err(|e| ClientError::Api(format!("Failed to parse response: {}", e)))
    } else {
        let error = response
            .json::<ErrorResponse>()
            .await
            .map_err(|e| ClientError::Api(format!("Failed to parse error: {}", e)))?;
        Err(ClientError::Api(error.error.unwrap_or_else(|| "Failed to fetch token prices".to_string())))
    }
}
