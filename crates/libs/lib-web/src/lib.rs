//! # Web Library
//!
//! The swap proxy's HTTP layer: handlers, middleware, services and server setup.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

pub use server::{create_router, init_tracing, start_server, AppState, ServerConfig};
