//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the swap client and the proxy API.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: The `{success, data, error}` response envelope
//!   - **[`dto::token`]**: Token list entries and price ratios
//!   - **[`dto::swap`]**: Allowance, approval and swap payloads from the aggregator
//!   - **[`dto::session`]**: The persisted wallet session record
//! - **[`network`]**: The single supported network and its well-known addresses
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::short_address`]**: The `0x1234...abcd` form shown once connected
//!
//! ## Wire Format
//!
//! Field names follow the proxy's JSON contract, which is camelCase
//! (`tokenOne`, `dstAmount`, `chainId`). Fields that the upstream sometimes omits
//! are `Option` and skipped when `None`.
//!
//! ## Usage in the Proxy
//!
//! ```rust,ignore
//! use shared::{ApiResponse, Token};
//! use axum::Json;
//!
//! async fn tokens() -> Json<ApiResponse<Vec<Token>>> {
//!     Json(ApiResponse::ok(Vec::new()))
//! }
//! ```
//!
//! ## Usage in the Client
//!
//! ```rust,ignore
//! use shared::{ApiResponse, Token};
//!
//! let response: ApiResponse<Vec<Token>> = reqwest::Client::new()
//!     .get("http://127.0.0.1:3300/tokens?chainId=137")
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

pub mod dto;
pub mod network;
pub mod utils;

// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
pub use network::*;
pub use utils::*;
