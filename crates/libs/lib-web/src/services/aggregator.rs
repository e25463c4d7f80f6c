//! # Aggregator Service
//!
//! Business logic for the aggregator passthrough endpoints.
//!
//! ## Overview
//!
//! Each method makes exactly one upstream call. Successful bodies are handed
//! back unchanged for the handler to wrap in `{success: true, data}`; only
//! the token list is reshaped and sliced.
//!
//! ## Chain Resolution
//!
//! The chain id comes from the request's `chainId` parameter. When it is
//! absent the configured default chain is used.
//!
//! ## Error Handling
//!
//! All methods return `Result<T, AppError>`. Upstream failures are logged with
//! the upstream status and body and surface to the client as a fixed message:
//! - [`PASSTHROUGH_ERROR_MESSAGE`] for spender, allowance, approval, swap, quote
//! - [`TOKENS_ERROR_MESSAGE`] for the token list

use lib_core::{AppError, Config, Result};
use lib_evm::aggregator::{AllowanceParams, ApproveParams, QuoteParams, SwapAggregator, SwapParams};
use lib_evm::UpstreamError;
use serde_json::Value;
use shared::Token;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

pub const PASSTHROUGH_ERROR_MESSAGE: &str = "1inch API request failed";
pub const TOKENS_ERROR_MESSAGE: &str = "Failed to fetch tokens";

/// Aggregator passthrough service.
pub struct AggregatorService {
    aggregator: Arc<dyn SwapAggregator>,
    config: Config,
}

impl AggregatorService {
    pub fn new(aggregator: Arc<dyn SwapAggregator>, config: Config) -> Self {
        Self { aggregator, config }
    }

    fn chain_id(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_string)
            .unwrap_or_else(|| self.config.default_chain_id.to_string())
    }

    /// Router contract address that must be approved to spend tokens.
    #[instrument(skip(self))]
    pub async fn spender(&self, chain_id: Option<&str>) -> Result<Value> {
        let chain_id = self.chain_id(chain_id);
        self.aggregator.spender(&chain_id).await.map_err(passthrough_error)
    }

    /// Current allowance of `tokenAddress` granted by `walletAddress` to the router.
    #[instrument(skip(self))]
    pub async fn allowance(&self, params: &AllowanceParams) -> Result<Value> {
        let chain_id = self.chain_id(params.chain_id.as_deref());
        self.aggregator.allowance(&chain_id, params).await.map_err(passthrough_error)
    }

    /// Unsigned approval transaction.
    #[instrument(skip(self))]
    pub async fn approve_transaction(&self, params: &ApproveParams) -> Result<Value> {
        let chain_id = self.chain_id(params.chain_id.as_deref());
        self.aggregator
            .approve_transaction(&chain_id, params)
            .await
            .map_err(passthrough_error)
    }

    /// Unsigned swap transaction.
    ///
    /// Partial fills are never allowed and gas estimation is never disabled,
    /// whatever the caller sent.
    #[instrument(skip(self))]
    pub async fn swap(&self, params: &SwapParams) -> Result<Value> {
        let chain_id = self.chain_id(params.chain_id.as_deref());
        let params = SwapParams {
            disable_estimate: false,
            allow_partial_fill: false,
            ..params.clone()
        };

        info!(
            chain_id = %chain_id,
            src = ?params.src,
            dst = ?params.dst,
            amount = ?params.amount,
            from = ?params.from,
            slippage = ?params.slippage,
            "Building swap transaction"
        );

        self.aggregator.swap(&chain_id, &params).await.map_err(passthrough_error)
    }

    /// Expected output amount, without transaction data.
    #[instrument(skip(self))]
    pub async fn quote(&self, params: &QuoteParams) -> Result<Value> {
        let chain_id = self.chain_id(params.chain_id.as_deref());
        self.aggregator.quote(&chain_id, params).await.map_err(passthrough_error)
    }

    /// Token list reshaped into [`Token`]s, starting at the configured offset.
    ///
    /// Returns `max(0, n - offset)` tokens in upstream order.
    #[instrument(skip(self))]
    pub async fn tokens(&self, chain_id: Option<&str>) -> Result<Vec<Token>> {
        let chain_id = self.chain_id(chain_id);
        let upstream = self.aggregator.tokens(&chain_id).await.map_err(|e| {
            log_upstream_failure(&e);
            AppError::upstream(TOKENS_ERROR_MESSAGE, e)
        })?;

        let total = upstream.len();
        let tokens: Vec<Token> = upstream
            .into_iter()
            .skip(self.config.token_list_offset)
            .map(Token::from)
            .collect();

        debug!(total, served = tokens.len(), offset = self.config.token_list_offset, "Token list sliced");
        Ok(tokens)
    }
}

fn log_upstream_failure(err: &UpstreamError) {
    error!(error = %err, body = ?err.body(), "Aggregator request failed");
}

fn passthrough_error(err: UpstreamError) -> AppError {
    log_upstream_failure(&err);
    AppError::upstream(PASSTHROUGH_ERROR_MESSAGE, err)
}
