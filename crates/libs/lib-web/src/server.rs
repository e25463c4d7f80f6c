//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! The proxy is stateless: [`AppState`] only holds configuration and the two
//! upstream clients, shared behind trait objects so tests can substitute
//! in-memory upstreams.

// region: --- Imports
use axum::{extract::FromRef, routing::get, Router};
use lib_core::Config;
use lib_evm::{AggregatorClient, PriceClient, PriceOracle, SwapAggregator};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use crate::handlers;
use crate::middleware::{log_requests, mw_req_stamp::request_id, stamp_req};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub aggregator: Arc<dyn SwapAggregator>,
    pub prices: Arc<dyn PriceOracle>,
}

impl AppState {
    /// Build the real upstream clients from configuration.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let mut aggregator = AggregatorClient::builder()
            .api_base(config.aggregator_api_base.clone())
            .auth_token(config.auth_token.clone());
        let mut prices = PriceClient::builder()
            .api_base(config.price_api_base.clone())
            .api_key(config.moralis_key.clone())
            .chain(config.price_chain.clone());

        if let Some(timeout) = config.upstream_timeout {
            aggregator = aggregator.timeout(timeout);
            prices = prices.timeout(timeout);
        }

        Ok(Self {
            aggregator: Arc::new(aggregator.build()?),
            prices: Arc::new(prices.build()?),
            config,
        })
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn SwapAggregator> {
    fn from_ref(state: &AppState) -> Self {
        state.aggregator.clone()
    }
}

impl FromRef<AppState> for Arc<dyn PriceOracle> {
    fn from_ref(state: &AppState) -> Self {
        state.prices.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins; empty allows any origin
    pub allowed_origins: Vec<String>,
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize tracing from `LOG_LEVEL` (default `info`).
pub fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => tracing_subscriber::EnvFilter::new(&log_level),
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Global tracing subscriber already set");
    }

    info!(" Log level: {}", log_level);
}

/// Load configuration, build the upstream clients and serve until shutdown.
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - An HTTP client cannot be built
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    info!(" SWAP PROXY STARTING");

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;

    if app_config.auth_token.is_empty() {
        tracing::warn!("AUTH_TOKEN is not set; aggregator requests will be rejected upstream");
    }
    if app_config.moralis_key.is_empty() {
        tracing::warn!("MORALIS_KEY is not set; price requests will be rejected upstream");
    }

    let bind_address = app_config.bind_address();
    info!(
        aggregator = %app_config.aggregator_api_base,
        prices = %app_config.price_api_base,
        token_list_offset = app_config.token_list_offset,
        timeout = ?app_config.upstream_timeout,
        "Upstreams configured"
    );

    let state = AppState::from_config(app_config)?;
    let app = create_router(state, config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!(" SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState, allowed_origins: Vec<String>) -> Router {
    let origins: Vec<axum::http::HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    Router::new()
        .route("/tokenPrice", get(handlers::price::get_token_price))
        .route("/approve/spender", get(handlers::approve::get_spender))
        .route("/approve/allowance", get(handlers::approve::get_allowance))
        .route("/approve/transaction", get(handlers::approve::get_approve_transaction))
        .route("/call/swap", get(handlers::swap::get_swap))
        .route("/quote", get(handlers::swap::get_quote))
        .route("/tokens", get(handlers::tokens::get_tokens))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        // Innermost: sees the stamp set by the outer layer
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id(request),
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

fn log_server_info() {
    info!(" PRICES:");
    info!("   • GET  /tokenPrice?addressOne={{address}}&addressTwo={{address}}");
    info!(" APPROVALS:");
    info!("   • GET  /approve/spender?chainId=137");
    info!("   • GET  /approve/allowance?chainId=137&tokenAddress={{address}}&walletAddress={{address}}");
    info!("   • GET  /approve/transaction?chainId=137&tokenAddress={{address}}&amount={{raw}}");
    info!(" SWAP:");
    info!("   • GET  /call/swap?chainId=137&src={{address}}&dst={{address}}&amount={{raw}}&from={{address}}&slippage=2.5");
    info!("   • GET  /quote?chainId=137&src={{address}}&dst={{address}}&amount={{raw}}");
    info!(" TOKENS:");
    info!("   • GET  /tokens?chainId=137");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
