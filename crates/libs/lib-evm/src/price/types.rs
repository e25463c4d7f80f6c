use serde::Deserialize;

/// Subset of the Moralis `erc20/{address}/price` response the proxy reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPriceResponse {
    pub usd_price: f64,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(rename = "24hrPercentChange", default)]
    pub percent_change_24h: Option<String>,
}
