//! # Common Error Types
//!
//! Consolidated error handling for the swap client.
//!
//! ## Error Categories
//!
//! - **Api**: Proxy API communication errors (network, HTTP, failure envelope)
//! - **Wallet**: Wallet provider failures (rejections, RPC errors, reverts)
//! - **Validation**: Input validation errors (empty amount, bad token index)
//! - **State**: Operation not allowed in the current state (not connected, swap in flight)
//! - **Storage**: Session persistence failures
//! - **Swap**: Any failure inside the swap sequence, wrapping its cause
//!
//! ```rust
//! use swap_client::core::error::ClientError;
//!
//! let err = ClientError::Validation("Enter an amount".to_string());
//! assert_eq!(err.to_string(), "Validation error: Enter an amount");
//! ```

use crate::wallet::WalletError;
use thiserror::Error;

/// Message shown when the swap sequence fails at any step.
pub const SWAP_FAILED_MESSAGE: &str = "Swap transaction failed";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Proxy API error. Carries the proxy's `error` string when there was one.
    #[error("API error: {0}")]
    Api(String),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// The approve-then-swap sequence stopped at some step.
    #[error("Swap transaction failed: {0}")]
    Swap(Box<ClientError>),
}

impl ClientError {
    /// Message suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api(msg) | ClientError::Validation(msg) | ClientError::State(msg) => msg.clone(),
            ClientError::Wallet(err) if err.is_user_rejection() => "Request rejected in wallet".to_string(),
            ClientError::Wallet(err) => err.to_string(),
            ClientError::Storage(_) => "Could not access the saved session".to_string(),
            ClientError::Swap(_) => SWAP_FAILED_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Api(format!("Network error: {}", err))
    }
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
