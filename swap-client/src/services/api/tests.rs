//! ApiClient tests against a local stand-in proxy.

use super::ApiClient;
use crate::core::error::ClientError;
use crate::core::service::{ApiService, SwapRequest};
use axum::{
    extract::Query,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;

type Params = Query<HashMap<String, String>>;

async fn token_price(Query(q): Params) -> (StatusCode, Json<Value>) {
    if q.get("addressTwo").map(String::as_str) == Some("0xbad") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": "Error fetching token prices" })),
        );
    }
    (StatusCode::OK, Json(json!({ "tokenOne": 0.52, "tokenTwo": 1.10, "ratio": 0.52 / 1.10 })))
}

async fn tokens(Query(q): Params) -> Json<Value> {
    assert_eq!(q.get("chainId").map(String::as_str), Some("137"));
    Json(json!({
        "success": true,
        "data": [
            { "ticker": "USDC", "name": "USD Coin", "img": "https://x/usdc.png", "address": "0x2791bca1f2de4661ed88a30c99a7a9449aa84174", "decimals": 6 },
            { "ticker": "WETH", "name": "Wrapped Ether", "address": "0x7ceb23fd6bc0add59e62ac25578270cff1b9f619", "decimals": 18 }
        ]
    }))
}

async fn swap(Query(q): Params) -> (StatusCode, Json<Value>) {
    if q.get("amount").map(String::as_str) == Some("0") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": "1inch API request failed" })),
        );
    }
    (StatusCode::OK, Json(json!({
        "success": true,
        "data": {
            "dstAmount": "1090000",
            "tx": { "from": q["from"], "to": "0x1111111254eeb25477b68fb85ed929f73a960582", "data": "0x12aa3caf", "value": "0", "gas": 250000, "gasPrice": "30000000000" }
        }
    })))
}

async fn allowance() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "error": "1inch API request failed" })),
    )
}

async fn spawn_proxy() -> ApiClient {
    let app = Router::new()
        .route("/tokenPrice", get(token_price))
        .route("/tokens", get(tokens))
        .route("/call/swap", get(swap))
        .route("/approve/allowance", get(allowance));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::new(format!("http://{}/", addr))
}

#[tokio::test]
async fn test_token_prices_unwrapped_body() {
    let client = spawn_proxy().await;
    let prices = client.token_prices("0xeee", "0x279").await.unwrap();
    assert!((prices.ratio - 0.52 / 1.10).abs() < 1e-12);
}

#[tokio::test]
async fn test_token_prices_failure_message() {
    let client = spawn_proxy().await;
    let err = client.token_prices("0xeee", "0xbad").await.unwrap_err();
    assert!(matches!(err, ClientError::Api(ref msg) if msg == "Error fetching token prices"));
}

#[tokio::test]
async fn test_tokens_envelope() {
    let client = spawn_proxy().await;
    let tokens = client.tokens(137).await.unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].ticker, "USDC");
    assert_eq!(tokens[1].img, None);
}

#[tokio::test]
async fn test_swap_sends_all_params() {
    let client = spawn_proxy().await;
    let request = SwapRequest {
        chain_id: 137,
        src: "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee".to_string(),
        dst: "0x2791bca1f2de4661ed88a30c99a7a9449aa84174".to_string(),
        amount: "1000000000000000000".to_string(),
        from: "0x71c7656ec7ab88b098defb751b7401b5f6d8976f".to_string(),
        slippage: 2.5,
    };

    let data = client.swap(&request).await.unwrap();
    assert_eq!(data.dst_amount, "1090000");
    assert_eq!(data.tx.to, "0x1111111254eeb25477b68fb85ed929f73a960582");
    assert_eq!(data.tx.from.as_deref(), Some("0x71c7656ec7ab88b098defb751b7401b5f6d8976f"));
}

#[tokio::test]
async fn test_swap_failure_envelope_without_data() {
    let client = spawn_proxy().await;
    let request = SwapRequest {
        chain_id: 137,
        src: "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee".to_string(),
        dst: "0x2791bca1f2de4661ed88a30c99a7a9449aa84174".to_string(),
        amount: "0".to_string(),
        from: "0x71c7656ec7ab88b098defb751b7401b5f6d8976f".to_string(),
        slippage: 2.5,
    };

    let err = client.swap(&request).await.unwrap_err();
    assert!(matches!(err, ClientError::Api(ref msg) if msg == "1inch API request failed"));
}

#[tokio::test]
async fn test_failure_envelope_becomes_api_error() {
    let client = spawn_proxy().await;
    let err = client.allowance(137, "0xa", "0xb").await.unwrap_err();
    assert_eq!(err.user_message(), "1inch API request failed");
}
