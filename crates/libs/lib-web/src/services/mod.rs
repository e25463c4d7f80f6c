//! # Services Layer
//!
//! Business logic between the HTTP handlers and the upstream clients:
//!
//! ```text
//! Handlers (HTTP) → Services → lib-evm clients → Price / Aggregator APIs
//! ```
//!
//! - [`price`] - concurrent USD price pair lookup and ratio
//! - [`aggregator`] - aggregator passthroughs and the token list slice
//!
//! Services hold their upstream behind a trait object (`Arc<dyn PriceOracle>`,
//! `Arc<dyn SwapAggregator>`) and return `Result<T, AppError>`, converting
//! upstream failures into the message the client is allowed to see.

pub mod aggregator;
pub mod price;

pub use aggregator::AggregatorService;
pub use price::PriceService;
