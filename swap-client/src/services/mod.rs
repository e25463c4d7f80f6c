//! # Services
//!
//! - [`api`] - HTTP client for the swap proxy

pub mod api;
