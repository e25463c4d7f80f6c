//! # Wallet
//!
//! The client never holds keys. Every signature goes through a
//! [`WalletProvider`]: a browser-style EIP-1193 provider, or in the CLI a
//! JSON-RPC node with unlocked accounts ([`RpcWallet`]).
//!
//! Providers also push [`WalletEvent`]s. Any account or chain change
//! invalidates the current session (see [`crate::session`]).

pub mod error;
pub mod network;
pub mod rpc;

use alloy_primitives::U256;
use async_trait::async_trait;
use shared::{NetworkConfig, TransactionData};
use tokio::sync::broadcast;

pub use error::WalletError;
pub use network::{switch_network, SwitchOutcome};
pub use rpc::RpcWallet;

/// Change notifications from the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    AccountsChanged(Vec<String>),
    ChainChanged(u64),
}

/// A signer the client can ask to switch networks and send transactions.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Chain the wallet is currently on
    async fn chain_id(&self) -> Result<u64, WalletError>;

    /// Ask the user to expose accounts; the first one is used
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError>;

    /// Native balance in wei
    async fn balance(&self, account: &str) -> Result<U256, WalletError>;

    /// `wallet_switchEthereumChain` with a hex chain id
    async fn switch_chain(&self, chain_id: &str) -> Result<(), WalletError>;

    /// `wallet_addEthereumChain`
    async fn add_chain(&self, network: &NetworkConfig) -> Result<(), WalletError>;

    /// Sign and broadcast; returns the transaction hash.
    ///
    /// Only `to`, `value` and `data` of `tx` are used, the wallet estimates gas itself.
    async fn send_transaction(&self, from: &str, tx: &TransactionData) -> Result<String, WalletError>;

    /// Block until the transaction is mined. Fails if it reverted.
    async fn wait_for_transaction(&self, hash: &str) -> Result<(), WalletError>;

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent>;
}
