//! # EVM Upstream Library
//!
//! Clients for the two third-party services behind the proxy:
//!
//! - [`aggregator`] - 1inch Swap API (spender, allowance, approvals, quotes, swaps, token list)
//! - [`price`] - Moralis token price API
//!
//! Both are exposed through async traits ([`SwapAggregator`], [`PriceOracle`])
//! so the web layer can be exercised without network access.

pub mod address;
pub mod aggregator;
pub mod error;
pub mod price;

// Re-export commonly used types from root for convenience
pub use address::price_lookup_address;
pub use aggregator::{AggregatorClient, SwapAggregator};
pub use error::UpstreamError;
pub use price::{PriceClient, PriceOracle};
