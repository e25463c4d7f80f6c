//! # Token DTOs
//!
//! Token list entries served by `/tokens` and the USD price ratio served by
//! `/tokenPrice`.

use serde::{Deserialize, Serialize};

/// A swappable token on the supported network.
///
/// Identified by `address` within a chain. The proxy builds these from the
/// aggregator's token list; the client only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Token symbol, e.g. `USDC`
    pub ticker: String,
    pub name: String,
    /// Logo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// 20-byte hex address, checksummed or lowercase
    pub address: String,
    pub decimals: u8,
}

impl Token {
    /// Whether this token is the chain's native coin (represented by the sentinel address).
    pub fn is_native(&self) -> bool {
        crate::network::is_native_address(&self.address)
    }
}

/// USD prices of a token pair and their ratio.
///
/// `ratio` converts an amount of token one into token two:
/// `amount_two = amount_one * ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPrices {
    pub token_one: f64,
    pub token_two: f64,
    pub ratio: f64,
}

impl TokenPrices {
    pub fn new(token_one: f64, token_two: f64) -> Self {
        Self {
            token_one,
            token_two,
            ratio: token_one / token_two,
        }
    }
}
