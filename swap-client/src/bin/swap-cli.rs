//! Command-line swap client.
//!
//! Drives the library against the swap proxy and a JSON-RPC wallet endpoint
//! whose node holds the keys.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use swap_client::core::ApiService;
use swap_client::services::api::{ApiClient, DEFAULT_PROXY_URL};
use swap_client::session::{ConnectionStatus, FileStore, SessionManager, SessionStore};
use swap_client::swap::{Side, Slippage, SwapController};
use swap_client::wallet::RpcWallet;
use tracing_subscriber::EnvFilter;

/// Polygon token swaps through the swap proxy
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Swap proxy base URL.
    #[arg(long, env = "PROXY_URL", default_value = DEFAULT_PROXY_URL)]
    proxy_url: String,

    /// JSON-RPC endpoint of the wallet node.
    #[arg(long, env = "WALLET_RPC_URL", default_value = "http://127.0.0.1:8545")]
    wallet_rpc_url: String,

    /// Where the connected account is remembered.
    #[arg(long, env = "SESSION_FILE", default_value = "swap-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Connect the wallet, switching to Polygon if needed.
    Connect,
    /// Forget the connected account.
    Disconnect,
    /// Show the saved session.
    Status,
    /// List swappable tokens with their indexes.
    Tokens,
    /// USD prices of two tokens and their ratio.
    Price {
        address_one: String,
        address_two: String,
    },
    /// Swap an amount of one token for another.
    Swap {
        /// Index of the source token (see `tokens`).
        #[arg(long)]
        from: usize,
        /// Index of the destination token.
        #[arg(long)]
        to: usize,
        /// Amount of the source token, e.g. `1.5`.
        #[arg(long)]
        amount: String,
        /// Slippage tolerance in percent: 0.5, 2.5 or 5.
        #[arg(long, default_value_t = 2.5)]
        slippage: f64,
        /// Print the expected output without sending anything.
        #[arg(long)]
        quote_only: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let wallet = Arc::new(RpcWallet::new(cli.wallet_rpc_url.clone()));
    let store: Arc<dyn SessionStore> = Arc::new(FileStore::new(cli.session_file.clone()));
    let session = Arc::new(SessionManager::new(wallet.clone(), store.clone()));
    let api = Arc::new(ApiClient::new(cli.proxy_url.clone()));

    match cli.command {
        Commands::Connect => {
            let status = session.connect().await?;
            report(&session, status);
        }
        Commands::Disconnect => {
            session.disconnect()?;
            println!("Disconnected");
        }
        Commands::Status => match store.load()? {
            Some(record) => println!(
                "{} on {} (chain {}), balance {} MATIC",
                record.shortaddress, record.network_name, record.chain_id, record.balance
            ),
            None => println!("Not connected"),
        },
        Commands::Tokens => {
            require_connected(&session).await?;
            let controller = SwapController::new(api, session.clone());
            controller.load_tokens().await?;
            for (index, token) in controller.form().tokens().iter().enumerate() {
                println!("{:>4}  {:<10} {:<42} {}", index, token.ticker, token.address, token.name);
            }
        }
        Commands::Price {
            address_one,
            address_two,
        } => {
            let prices = api.token_prices(&address_one, &address_two).await?;
            println!(
                "tokenOne ${}  tokenTwo ${}  ratio {}",
                prices.token_one, prices.token_two, prices.ratio
            );
        }
        Commands::Swap {
            from,
            to,
            amount,
            slippage,
            quote_only,
        } => {
            let slippage = Slippage::from_percent(slippage)
                .with_context(|| format!("unsupported slippage {}%, use 0.5, 2.5 or 5", slippage))?;
            require_connected(&session).await?;

            let watcher = wallet.clone().spawn_watcher(Duration::from_secs(2));
            let invalidation = session.clone().watch_events();

            let controller = SwapController::new(api, session.clone());
            controller.load_tokens().await?;
            controller.select_token(Side::One, from).await?;
            controller.select_token(Side::Two, to).await?;
            controller.set_slippage(slippage);
            controller.change_amount(&amount);

            let form = controller.form();
            let (one, two) = form.pair().context("no token pair selected")?;
            let expected = controller.preview_quote().await?;
            println!("{} {} -> ~{} {}", amount, one.ticker, expected, two.ticker);

            if !quote_only {
                let result = controller.execute_swap().await;
                watcher.abort();
                invalidation.abort();
                match result {
                    Ok(hash) => println!("Swap confirmed: {}", hash),
                    Err(e) => bail!("{}", e.user_message()),
                }
            }
        }
    }

    Ok(())
}

/// Reconnect from the saved session; fails unless the wallet ends up connected.
async fn require_connected(session: &SessionManager) -> anyhow::Result<()> {
    let status = session.restore().await?;
    if status != ConnectionStatus::Connected {
        bail!("wallet not connected, run `swap-cli connect` first");
    }
    Ok(())
}

fn report(session: &SessionManager, status: ConnectionStatus) {
    match (status, session.account()) {
        (ConnectionStatus::Connected, Some(account)) => {
            println!("Connected {} ({} MATIC)", account.shortaddress, account.balance)
        }
        (ConnectionStatus::WrongNetwork, _) => println!("Wallet is not on Polygon mainnet"),
        (status, _) => println!("{:?}", status),
    }
}
