//! # Centralized Error Handling
//!
//! This module defines the proxy-wide error type [`AppError`]. It follows the
//! `thiserror` pattern for ergonomic error handling.
//!
//! ## Wire Contract
//!
//! Every failure is answered with HTTP 500 and the uniform envelope
//!
//! ```json
//! { "success": false, "error": "<user message>" }
//! ```
//!
//! Callers only get a boolean and a string; the detailed cause stays in the
//! server log.
//!
//! ## Error Categories
//!
//! - [`Upstream`](AppError::Upstream) - the price or aggregator API failed
//!   (transport error, non-2xx status, undecodable body)
//! - [`Config`](AppError::Config) - configuration error during startup
//! - [`Internal`](AppError::Internal) - unexpected failures
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn fetch() -> Result<String> {
//!     Err(AppError::upstream("1inch API request failed", "status 401: Unauthorized"))
//! }
//!
//! assert_eq!(fetch().unwrap_err().user_message(), "1inch API request failed");
//! ```

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use shared::ErrorResponse;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Proxy-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Upstream API failure.
    ///
    /// `message` is what the client sees; `detail` is logged.
    #[error("Upstream error: {message} ({detail})")]
    Upstream { message: String, detail: String },

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn upstream(message: impl Into<String>, detail: impl ToString) -> Self {
        AppError::Upstream {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Get the message returned to the client.
    ///
    /// Internal and configuration errors return a generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Upstream { message, .. } => message.clone(),
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Server error: {}", self);

        let body = Json(ErrorResponse::failure(self.user_message()));
        (self.status_code(), body).into_response()
    }
}

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}
