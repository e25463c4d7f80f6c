//! # JSON-RPC Wallet
//!
//! [`WalletProvider`] backed by an Ethereum JSON-RPC endpoint whose node
//! manages the keys (unlocked accounts, a dev node, or a signing proxy).
//!
//! The endpoint cannot push events, so account and chain changes are found by
//! polling ([`RpcWallet::poll_changes`] / [`RpcWallet::spawn_watcher`]).

use alloy_primitives::U256;
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Client;
use serde_json::{json, Value};
use shared::{NetworkConfig, TransactionData};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use super::{WalletError, WalletEvent, WalletProvider};

const METHOD_NOT_FOUND: i64 = -32601;
const EVENT_CAPACITY: usize = 16;

pub struct RpcWallet {
    http: Client,
    rpc_url: String,
    next_id: AtomicU64,
    events: broadcast::Sender<WalletEvent>,
    /// Chain and accounts seen on the last poll
    last_seen: Mutex<Option<(u64, Vec<String>)>>,
    receipt_interval: Duration,
}

impl RpcWallet {
    pub fn new(rpc_url: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            http: Client::new(),
            rpc_url: rpc_url.into(),
            next_id: AtomicU64::new(1),
            events,
            last_seen: Mutex::new(None),
            receipt_interval: Duration::from_secs(1),
        }
    }

    /// Interval between receipt polls while waiting for a transaction.
    pub fn with_receipt_interval(mut self, interval: Duration) -> Self {
        self.receipt_interval = interval;
        self
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": self.next_id.fetch_add(1, Ordering::Relaxed),
        });
        debug!(method, "wallet rpc call");

        let response: Value = self.http.post(&self.rpc_url).json(&payload).send().await?.json().await?;

        if let Some(error) = response.get("error") {
            return Err(WalletError::Rpc {
                code: error.get("code").and_then(Value::as_i64).unwrap_or_default(),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            });
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| WalletError::InvalidResponse(format!("{} response has no result", method)))
    }

    async fn accounts(&self) -> Result<Vec<String>, WalletError> {
        let result = self.call("eth_accounts", json!([])).await?;
        serde_json::from_value(result).map_err(|e| WalletError::InvalidResponse(e.to_string()))
    }

    /// Compare chain and accounts with the previous poll and broadcast what changed.
    ///
    /// The first poll only records the baseline.
    pub async fn poll_changes(&self) -> Result<Vec<WalletEvent>, WalletError> {
        let chain_id = self.chain_id().await?;
        let accounts = self.accounts().await?;

        let mut changes = Vec::new();
        {
            let mut last_seen = self.last_seen.lock();
            if let Some((last_chain, last_accounts)) = last_seen.as_ref() {
                if *last_chain != chain_id {
                    changes.push(WalletEvent::ChainChanged(chain_id));
                }
                if *last_accounts != accounts {
                    changes.push(WalletEvent::AccountsChanged(accounts.clone()));
                }
            }
            *last_seen = Some((chain_id, accounts));
        }

        for event in &changes {
            info!(?event, "Wallet changed");
            // No receivers is fine
            let _ = self.events.send(event.clone());
        }
        Ok(changes)
    }

    /// Poll for changes every `interval` until the task is aborted.
    pub fn spawn_watcher(self: Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Err(e) = self.poll_changes().await {
                    warn!(error = %e, "Wallet poll failed");
                }
            }
        })
    }
}

fn parse_hex_u256(value: &Value) -> Result<U256, WalletError> {
    value
        .as_str()
        .and_then(|hex| hex.strip_prefix("0x"))
        .and_then(|hex| U256::from_str_radix(hex, 16).ok())
        .ok_or_else(|| WalletError::InvalidResponse(format!("expected hex quantity, got {}", value)))
}

/// Decimal string (as returned by the aggregator) to a hex quantity.
fn to_hex_quantity(decimal: &str) -> Result<String, WalletError> {
    let value = if decimal.is_empty() {
        U256::ZERO
    } else {
        U256::from_str(decimal).map_err(|e| WalletError::InvalidResponse(format!("invalid amount {:?}: {}", decimal, e)))?
    };
    Ok(format!("{:#x}", value))
}

#[async_trait]
impl WalletProvider for RpcWallet {
    async fn chain_id(&self) -> Result<u64, WalletError> {
        let result = self.call("eth_chainId", json!([])).await?;
        result
            .as_str()
            .and_then(|hex| hex.strip_prefix("0x"))
            .and_then(|hex| u64::from_str_radix(hex, 16).ok())
            .ok_or_else(|| WalletError::InvalidResponse(format!("expected hex chain id, got {}", result)))
    }

    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        let accounts = match self.call("eth_requestAccounts", json!([])).await {
            Ok(result) => serde_json::from_value(result).map_err(|e| WalletError::InvalidResponse(e.to_string()))?,
            // Plain nodes do not implement the EIP-1102 method
            Err(WalletError::Rpc { code: METHOD_NOT_FOUND, .. }) => self.accounts().await?,
            Err(e) => return Err(e),
        };

        if accounts.is_empty() {
            return Err(WalletError::NoAccounts);
        }
        Ok(accounts)
    }

    async fn balance(&self, account: &str) -> Result<U256, WalletError> {
        let result = self.call("eth_getBalance", json!([account, "latest"])).await?;
        parse_hex_u256(&result)
    }

    async fn switch_chain(&self, chain_id: &str) -> Result<(), WalletError> {
        self.call("wallet_switchEthereumChain", json!([{ "chainId": chain_id }]))
            .await
            .map(|_| ())
    }

    async fn add_chain(&self, network: &NetworkConfig) -> Result<(), WalletError> {
        self.call("wallet_addEthereumChain", json!([network])).await.map(|_| ())
    }

    async fn send_transaction(&self, from: &str, tx: &TransactionData) -> Result<String, WalletError> {
        let params = json!([{
            "from": from,
            "to": tx.to,
            "data": tx.data,
            "value": to_hex_quantity(&tx.value)?,
        }]);

        let result = self.call("eth_sendTransaction", params).await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| WalletError::InvalidResponse(format!("expected transaction hash, got {}", result)))
    }

    async fn wait_for_transaction(&self, hash: &str) -> Result<(), WalletError> {
        loop {
            let receipt = self.call("eth_getTransactionReceipt", json!([hash])).await?;
            if !receipt.is_null() {
                return match receipt.get("status").and_then(Value::as_str) {
                    Some("0x0") => Err(WalletError::Reverted(hash.to_string())),
                    _ => Ok(()),
                };
            }
            tokio::time::sleep(self.receipt_interval).await;
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}
