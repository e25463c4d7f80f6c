//! # Price Service
//!
//! USD price pair lookup behind `/tokenPrice`.
//!
//! Both prices are fetched concurrently and joined: either both arrive and a
//! ratio is computed, or the whole lookup fails. The native-asset sentinel is
//! replaced by the wrapped token before lookup.

use lib_core::{AppError, Result};
use lib_evm::{price_lookup_address, PriceOracle};
use shared::TokenPrices;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Message returned to the client when either price lookup fails.
pub const PRICE_ERROR_MESSAGE: &str = "Error fetching token prices";

pub struct PriceService {
    prices: Arc<dyn PriceOracle>,
}

impl PriceService {
    pub fn new(prices: Arc<dyn PriceOracle>) -> Self {
        Self { prices }
    }

    /// Prices of `address_one` and `address_two` and `ratio = one / two`.
    #[instrument(skip(self))]
    pub async fn token_prices(&self, address_one: &str, address_two: &str) -> Result<TokenPrices> {
        let lookup_one = price_lookup_address(address_one);
        let lookup_two = price_lookup_address(address_two);
        debug!(lookup_one, lookup_two, "Fetching token prices");

        let (one, two) = tokio::try_join!(self.prices.usd_price(lookup_one), self.prices.usd_price(lookup_two))
            .map_err(|e| {
                error!(error = %e, body = ?e.body(), "Price lookup failed");
                AppError::upstream(PRICE_ERROR_MESSAGE, e)
            })?;

        Ok(TokenPrices::new(one, two))
    }
}
