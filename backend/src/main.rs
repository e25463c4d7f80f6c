//! # Backend Service
//!
//! Thin entry point that delegates to lib-web for server setup.
//!
//! Configuration comes from the environment (or a `.env` file): `PORT`,
//! `AUTH_TOKEN`, `MORALIS_KEY` and the optional overrides documented on
//! `lib_core::Config`. `ALLOWED_ORIGINS` (comma separated) restricts CORS;
//! unset allows any origin.

use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .map(|origins| {
            origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    start_server(ServerConfig { allowed_origins }).await
}
