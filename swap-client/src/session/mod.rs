//! # Wallet Session
//!
//! - **[`manager`]**: connection state machine and event-driven invalidation
//! - **[`store`]**: persistence of the connected account record

pub mod manager;
pub mod store;

pub use manager::{invalidation_for, ConnectionStatus, SessionInvalidated, SessionManager};
pub use store::{FileStore, MemoryStore, SessionStore};
