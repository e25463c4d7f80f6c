//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged between the swap client
//! and the proxy API.
//!
//! ## Module Organization
//!
//! - [`envelope`] - `{success, data}` / `{success, error}` wrapper
//! - [`token`] - Token list entries and USD price ratios
//! - [`swap`] - Allowance, approval transaction, quote and swap payloads
//! - [`session`] - Persisted wallet session record
//!
//! ## Example JSON Communication
//!
//! ```text
//! GET /tokenPrice?addressOne=0xeeee...eeee&addressTwo=0x2791...4174
//!
//! HTTP/1.1 200 OK
//! {
//!   "tokenOne": 0.52,
//!   "tokenTwo": 1.10,
//!   "ratio": 0.4727272727272727
//! }
//! ```
//!
//! ```text
//! GET /approve/allowance?chainId=137&tokenAddress=0x...&walletAddress=0x...
//!
//! HTTP/1.1 200 OK
//! { "success": true, "data": { "allowance": "0" } }
//! ```

pub mod envelope;
pub mod session;
pub mod swap;
pub mod token;

pub use envelope::*;
pub use session::*;
pub use swap::*;
pub use token::*;
