//! # Aggregator API Types
//!
//! Query parameters forwarded to the 1inch Swap API and the token list it returns.
//!
//! The parameter structs double as the proxy's query extractors: they
//! deserialize from the incoming query string (including `chainId`) and
//! serialize into the upstream query string (without `chainId`, which goes in
//! the path). Absent parameters are not validated and simply not forwarded.

use serde::{Deserialize, Deserializer, Serialize};
use shared::Token;

/// Query for endpoints that only need a chain id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainParams {
    #[serde(rename = "chainId", skip_serializing)]
    pub chain_id: Option<String>,
}

/// `GET /approve/allowance`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceParams {
    #[serde(skip_serializing)]
    pub chain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

/// `GET /approve/transaction`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveParams {
    #[serde(skip_serializing)]
    pub chain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_address: Option<String>,
    /// Raw token amount; the aggregator approves an unlimited amount when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

/// `GET /call/swap`
///
/// `disable_estimate` and `allow_partial_fill` are fixed by the proxy; they are
/// never read from the incoming query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapParams {
    #[serde(skip_serializing)]
    pub chain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Percent, e.g. `2.5`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slippage: Option<String>,
    #[serde(skip_deserializing)]
    pub disable_estimate: bool,
    #[serde(skip_deserializing)]
    pub allow_partial_fill: bool,
}

/// `GET /quote`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteParams {
    #[serde(skip_serializing)]
    pub chain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

/// Response of the aggregator's `/tokens` endpoint.
///
/// Tokens are keyed by address. Key order is the upstream order and is
/// preserved (`serde_json` is built with `preserve_order`).
#[derive(Debug, Deserialize)]
pub struct TokenListResponse {
    pub tokens: serde_json::Map<String, serde_json::Value>,
}

/// A single entry of the aggregator token list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpstreamToken {
    pub symbol: String,
    pub name: String,
    pub address: String,
    #[serde(deserialize_with = "decimals_from_any")]
    pub decimals: u8,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: Option<String>,
}

impl From<UpstreamToken> for Token {
    fn from(token: UpstreamToken) -> Self {
        Token {
            ticker: token.symbol,
            name: token.name,
            img: token.logo_uri,
            address: token.address,
            decimals: token.decimals,
        }
    }
}

fn decimals_from_any<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("decimals out of range: {}", n))),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<u8>()
            .map_err(|e| serde::de::Error::custom(format!("invalid decimals {:?}: {}", s, e))),
        other => Err(serde::de::Error::custom(format!("invalid decimals: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_flags_are_fixed() {
        let params: SwapParams = serde_json::from_value(serde_json::json!({
            "chainId": "137",
            "src": "0xa",
            "dst": "0xb",
            "amount": "100",
            "from": "0xc",
            "slippage": "2.5",
            "allowPartialFill": true,
        }))
        .unwrap();

        assert_eq!(params.chain_id.as_deref(), Some("137"));
        assert!(!params.allow_partial_fill);

        let forwarded = serde_json::to_value(&params).unwrap();
        assert!(forwarded.get("chainId").is_none());
        assert_eq!(forwarded["allowPartialFill"], false);
        assert_eq!(forwarded["disableEstimate"], false);
        assert_eq!(forwarded["slippage"], "2.5");
    }

    #[test]
    fn test_missing_params_are_not_forwarded() {
        let params = AllowanceParams {
            chain_id: Some("137".to_string()),
            token_address: Some("0xa".to_string()),
            wallet_address: None,
        };
        let forwarded = serde_json::to_value(&params).unwrap();
        assert_eq!(forwarded, serde_json::json!({ "tokenAddress": "0xa" }));
    }

    #[test]
    fn test_upstream_token_reshape() {
        let raw = serde_json::json!({
            "symbol": "USDC",
            "name": "USD Coin",
            "address": "0x2791bca1f2de4661ed88a30c99a7a9449aa84174",
            "decimals": "6",
            "logoURI": "https://tokens.1inch.io/usdc.png",
            "tags": ["tokens"]
        });
        let token: Token = serde_json::from_value::<UpstreamToken>(raw).unwrap().into();
        assert_eq!(token.ticker, "USDC");
        assert_eq!(token.decimals, 6);
        assert_eq!(token.img.as_deref(), Some("https://tokens.1inch.io/usdc.png"));
    }
}
