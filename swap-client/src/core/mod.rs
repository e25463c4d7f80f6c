//! # Core Abstractions
//!
//! Error types and the service trait the rest of the client is written against.
//!
//! - **[`error`]**: Client error type (`ClientError`, `Result<T>`)
//! - **[`service`]**: `ApiService` trait for the proxy API
//!
//! ```rust,ignore
//! use swap_client::core::ApiService;
//!
//! // In production: the HTTP client
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new("http://127.0.0.1:3300"));
//!
//! // In tests: an in-memory fake
//! let api: Arc<dyn ApiService> = Arc::new(FakeApi::default());
//! ```

pub mod error;
pub mod service;

pub use error::{ClientError, Result, SWAP_FAILED_MESSAGE};
pub use service::{ApiService, SwapRequest};
