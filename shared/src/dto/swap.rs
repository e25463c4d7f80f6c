//! # Swap DTOs
//!
//! Payloads the aggregator returns inside the `data` field of the proxy
//! envelope. The proxy forwards them untouched; these types exist for the
//! client, which needs a handful of fields out of each.
//!
//! Unknown fields are ignored so that upstream additions never break decoding.

use serde::{Deserialize, Serialize};

/// `GET /approve/allowance` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceData {
    /// uint256 as a decimal string
    #[serde(deserialize_with = "string_or_number")]
    pub allowance: String,
}

/// `GET /approve/spender` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpenderData {
    pub address: String,
}

/// An unsigned transaction ready to be handed to the wallet.
///
/// Both `/approve/transaction` and the `tx` field of `/call/swap` use this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
    /// Hex calldata
    pub data: String,
    /// Wei as a decimal string
    #[serde(deserialize_with = "string_or_number")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opt_string_or_number")]
    pub gas_price: Option<String>,
}

/// `GET /call/swap` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapData {
    /// Destination amount in raw units
    pub dst_amount: String,
    pub tx: TransactionData,
}

/// `GET /quote` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    pub dst_amount: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_payload_from_aggregator() {
        let raw = serde_json::json!({
            "dstAmount": "1093210",
            "tx": {
                "from": "0x1111111111111111111111111111111111111111",
                "to": "0x111111125421ca6dc452d289314280a0f8842a65",
                "data": "0x07ed2379",
                "value": "1000000000000000000",
                "gas": 210000,
                "gasPrice": "31000000000"
            },
            "protocols": []
        });

        let swap: SwapData = serde_json::from_value(raw).unwrap();
        assert_eq!(swap.dst_amount, "1093210");
        assert_eq!(swap.tx.value, "1000000000000000000");
        assert_eq!(swap.tx.gas, Some(210000));
        assert_eq!(swap.tx.gas_price.as_deref(), Some("31000000000"));
    }

    #[test]
    fn test_allowance_accepts_number() {
        let allowance: AllowanceData = serde_json::from_value(serde_json::json!({ "allowance": 0 })).unwrap();
        assert_eq!(allowance.allowance, "0");
    }

    #[test]
    fn test_approval_payload_without_optional_fields() {
        let tx: TransactionData = serde_json::from_value(serde_json::json!({
            "to": "0x2791bca1f2de4661ed88a30c99a7a9449aa84174",
            "data": "0x095ea7b3",
            "value": "0"
        }))
        .unwrap();
        assert_eq!(tx.from, None);
        assert_eq!(tx.gas_price, None);
    }
}
