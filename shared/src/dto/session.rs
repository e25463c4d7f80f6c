//! Persisted wallet session record.

use serde::{Deserialize, Serialize};

/// Storage key the session record lives under.
pub const USER_ACCOUNT_KEY: &str = "userAccount";

/// The last-connected account, as written to client storage on connect.
///
/// Field names match the stored JSON (`shortaddress` and `networkName` are
/// part of the persisted format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub account: String,
    #[serde(rename = "chainId")]
    pub chain_id: u64,
    /// Native balance formatted in ether units
    pub balance: String,
    pub shortaddress: String,
    #[serde(rename = "networkName")]
    pub network_name: String,
}
