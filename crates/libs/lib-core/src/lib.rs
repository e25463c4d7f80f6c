//! # Core Library
//!
//! Configuration and error handling shared by the proxy crates.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
