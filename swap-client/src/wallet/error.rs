//! Wallet provider errors.
//!
//! Providers report failures as EIP-1193 style `{code, message}` pairs. Only
//! the network-switch flow looks at the code; everything else treats a
//! wallet error as opaque.

use thiserror::Error;

/// User rejected the request.
pub const USER_REJECTED: i64 = 4001;

/// The requested chain has not been added to the wallet.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

/// Older wallet builds report an unknown chain with this code instead of 4902.
pub const UNRECOGNIZED_CHAIN_LEGACY: i64 = 5902;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WalletError {
    /// The provider answered with an error object
    #[error("wallet error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The provider could not be reached
    #[error("wallet transport error: {0}")]
    Transport(String),

    /// The provider answered with something unexpected
    #[error("invalid wallet response: {0}")]
    InvalidResponse(String),

    #[error("wallet returned no accounts")]
    NoAccounts,

    /// The transaction was mined but failed
    #[error("transaction {0} reverted")]
    Reverted(String),
}

impl WalletError {
    pub fn code(&self) -> Option<i64> {
        match self {
            WalletError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code() == Some(USER_REJECTED)
    }

    /// Another request of the same kind is still waiting for the user.
    pub fn is_already_pending(&self) -> bool {
        matches!(self, WalletError::Rpc { message, .. } if message.contains("already pending"))
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        matches!(self.code(), Some(UNRECOGNIZED_CHAIN) | Some(UNRECOGNIZED_CHAIN_LEGACY))
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WalletError::InvalidResponse(err.to_string())
        } else {
            WalletError::Transport(err.to_string())
        }
    }
}
