//! # Swap Client
//!
//! Client side of the Polygon swap interface: talks to the swap proxy,
//! keeps the wallet session and runs the approve-then-swap sequence through
//! the user's wallet.
//!
//! ## Modules
//!
//! - **[`core`]**: `ClientError` and the `ApiService` trait
//! - **[`services`]**: HTTP implementation of `ApiService`
//! - **[`wallet`]**: `WalletProvider` trait, network switching, JSON-RPC wallet
//! - **[`session`]**: connection state machine and the persisted account record
//! - **[`swap`]**: swap form state and the swap controller
//!
//! ```rust,ignore
//! let api = Arc::new(ApiClient::new("http://127.0.0.1:3300"));
//! let wallet = Arc::new(RpcWallet::new("http://127.0.0.1:8545"));
//! let session = Arc::new(SessionManager::new(wallet, Arc::new(FileStore::new("session.json"))));
//!
//! session.restore().await?;
//! let swap = SwapController::new(api, session.clone());
//! swap.load_tokens().await?;
//! swap.change_amount("1.5");
//! let hash = swap.execute_swap().await?;
//! ```

pub mod core;
pub mod services;
pub mod session;
pub mod swap;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;
