//! # Supported Network
//!
//! The swap interface runs against exactly one network, Polygon mainnet.
//! This module holds its wallet configuration and the two addresses the proxy
//! and the client both special-case.

use serde::Serialize;

/// Address used by the aggregator to represent the chain's native coin.
pub const NATIVE_TOKEN_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// Wrapped MATIC, priced in place of the native sentinel.
pub const WRAPPED_NATIVE_ADDRESS: &str = "0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270";

/// Whether `address` is the native-asset sentinel.
pub fn is_native_address(address: &str) -> bool {
    address.eq_ignore_ascii_case(NATIVE_TOKEN_ADDRESS)
}

/// Native currency description sent with `wallet_addEthereumChain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Wallet-facing network configuration.
///
/// Serializes to the parameter object of `wallet_addEthereumChain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Hex chain id, e.g. `0x89`
    pub chain_id: &'static str,
    pub rpc_urls: &'static [&'static str],
    pub chain_name: &'static str,
    pub native_currency: NativeCurrency,
    pub block_explorer_urls: &'static [&'static str],
}

impl NetworkConfig {
    /// Numeric chain id.
    pub fn chain_id_number(&self) -> u64 {
        u64::from_str_radix(self.chain_id.trim_start_matches("0x"), 16).unwrap_or_default()
    }

    /// Whether a numeric chain id reported by the wallet is this network.
    pub fn matches(&self, chain_id: u64) -> bool {
        format!("0x{:x}", chain_id) == self.chain_id
    }
}

/// Name the session record is stored under; compared on reconnect.
pub const POLYGON_NETWORK_NAME: &str = "PolygonMainnet";

pub const POLYGON_MAINNET: NetworkConfig = NetworkConfig {
    chain_id: "0x89",
    rpc_urls: &["https://polygon-rpc.com"],
    chain_name: "Polygon Mainnet",
    native_currency: NativeCurrency {
        name: "MATIC",
        symbol: "MATIC",
        decimals: 18,
    },
    block_explorer_urls: &["https://polygonscan.com"],
};
