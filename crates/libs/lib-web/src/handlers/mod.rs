//! # HTTP Request Handlers
//!
//! Axum handlers for the proxy's REST surface, organized by feature.
//! Handlers extract state and query parameters, then delegate to
//! [`crate::services`].
//!
//! ## Handler Modules
//!
//! - **[`price`]**: `GET /tokenPrice` - USD price pair and ratio
//! - **[`approve`]**: `GET /approve/spender`, `GET /approve/allowance`, `GET /approve/transaction`
//! - **[`swap`]**: `GET /call/swap`, `GET /quote`
//! - **[`tokens`]**: `GET /tokens`
//!
//! ## Query Parameters
//!
//! Parameters are not validated. Every field is optional; a missing
//! `chainId` falls back to the configured default chain and any other missing
//! parameter is simply not forwarded, leaving the upstream to reject the call.
//!
//! ## Error Handling
//!
//! Handlers return `lib_core::Result<Json<T>>`. Any `AppError` becomes
//! HTTP 500 with `{ "success": false, "error": "<message>" }`.

pub mod approve;
pub mod price;
pub mod swap;
pub mod tokens;
