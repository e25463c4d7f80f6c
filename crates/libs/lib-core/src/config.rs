//! # Application Configuration
//!
//! This module manages proxy configuration loaded from environment variables.
//!
//! Upstream credentials are read but not validated: a missing
//! `AUTH_TOKEN` or `MORALIS_KEY` surfaces as an upstream failure on the first
//! request that needs it, not as a startup error.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env()?;
//! println!("listening on {}", config.bind_address());
//! # Ok::<(), lib_core::AppError>(())
//! ```

use crate::error::{AppError, Result};
use lib_utils::{get_env_or, get_env_parse_opt, get_env_parse_or};
use std::time::Duration;

/// Default 1inch Swap API base (v6.0). The chain id is appended per request.
pub const DEFAULT_AGGREGATOR_API_BASE: &str = "https://api.1inch.dev/swap/v6.0";

/// Default Moralis EVM API base.
pub const DEFAULT_PRICE_API_BASE: &str = "https://deep-index.moralis.io/api/v2.2";

/// Index the `/tokens` response starts from.
///
/// Entries before this offset in the upstream list are not served.
pub const DEFAULT_TOKEN_LIST_OFFSET: usize = 74;

/// Proxy configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Listen port
    pub port: u16,

    /// Bearer token for the swap aggregator
    pub auth_token: String,

    /// API key for the pricing provider
    pub moralis_key: String,

    /// Aggregator base URL, without trailing slash
    pub aggregator_api_base: String,

    /// Pricing API base URL, without trailing slash
    pub price_api_base: String,

    /// Chain identifier sent to the pricing API (hex, e.g. `0x89`)
    pub price_chain: String,

    /// Chain id used when a request carries no `chainId`
    pub default_chain_id: u64,

    /// First index of the upstream token list served by `/tokens`
    pub token_list_offset: usize,

    /// Optional HTTP timeout for upstream calls; `None` keeps client defaults
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: get_env_parse_or("PORT", 3300)?,
            auth_token: get_env_or("AUTH_TOKEN", ""),
            moralis_key: get_env_or("MORALIS_KEY", ""),
            aggregator_api_base: trim_base(get_env_or("AGGREGATOR_API_BASE", DEFAULT_AGGREGATOR_API_BASE)),
            price_api_base: trim_base(get_env_or("PRICE_API_BASE", DEFAULT_PRICE_API_BASE)),
            price_chain: get_env_or("PRICE_CHAIN", "0x89"),
            default_chain_id: get_env_parse_or("DEFAULT_CHAIN_ID", 137)?,
            token_list_offset: get_env_parse_or("TOKEN_LIST_OFFSET", DEFAULT_TOKEN_LIST_OFFSET)?,
            upstream_timeout: get_env_parse_opt::<u64>("UPSTREAM_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("AGGREGATOR_API_BASE", &self.aggregator_api_base),
            ("PRICE_API_BASE", &self.price_api_base),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AppError::Config(format!("{} must be an http(s) URL", name)));
            }
        }

        if self.upstream_timeout == Some(Duration::ZERO) {
            return Err(AppError::Config("UPSTREAM_TIMEOUT_SECS must be greater than 0".to_string()));
        }

        Ok(())
    }

    /// Socket address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3300,
            auth_token: String::new(),
            moralis_key: String::new(),
            aggregator_api_base: DEFAULT_AGGREGATOR_API_BASE.to_string(),
            price_api_base: DEFAULT_PRICE_API_BASE.to_string(),
            price_chain: "0x89".to_string(),
            default_chain_id: 137,
            token_list_offset: DEFAULT_TOKEN_LIST_OFFSET,
            upstream_timeout: None,
        }
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
