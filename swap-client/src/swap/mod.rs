//! # Swap
//!
//! - **[`form`]**: pair, amounts, ratio and slippage as plain state
//! - **[`controller`]**: price refresh, quote preview and the approve-then-swap sequence

pub mod controller;
pub mod form;

pub use controller::SwapController;
pub use form::{display_amount, Side, Slippage, SwapForm};
