//! # Proxy API Client Module
//!
//! HTTP client for the swap proxy.
//!
//! ```text
//! api/
//! ├── client.rs   - ApiClient, envelope handling, ApiService impl
//! ├── prices.rs   - /tokenPrice
//! ├── tokens.rs   - /tokens
//! ├── approve.rs  - /approve/spender, /approve/allowance, /approve/transaction
//! └── swap.rs     - /call/swap, /quote
//! ```

pub mod approve;
pub mod client;
pub mod prices;
pub mod swap;
pub mod tokens;

pub use client::{ApiClient, DEFAULT_PROXY_URL};

#[cfg(test)]
mod tests;
