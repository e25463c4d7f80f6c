//! # Swap Controller
//!
//! Drives the [`SwapForm`] against the proxy API and the connected wallet.
//!
//! ## Swap sequence
//!
//! ```text
//! parse amount ─▶ [ERC-20 only] allowance < amount? ─▶ approve tx ─▶ wait
//!              ─▶ swap tx ─▶ show dstAmount ─▶ send ─▶ wait ─▶ clear amounts
//! ```
//!
//! Steps run strictly one after another. The first failure aborts the rest and
//! is reported as [`ClientError::Swap`]; nothing already submitted is undone.

use alloy_primitives::utils::{parse_units, ParseUnits};
use alloy_primitives::U256;
use parking_lot::RwLock;
use shared::{TokenPrices, UserAccount};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::form::{display_amount, Side, Slippage, SwapForm};
use crate::core::error::{ClientError, Result};
use crate::core::service::{ApiService, SwapRequest};
use crate::session::SessionManager;

pub struct SwapController {
    api: Arc<dyn ApiService>,
    session: Arc<SessionManager>,
    form: RwLock<SwapForm>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the swap ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SwapController {
    pub fn new(api: Arc<dyn ApiService>, session: Arc<SessionManager>) -> Self {
        Self {
            api,
            session,
            form: RwLock::new(SwapForm::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Snapshot of the form.
    pub fn form(&self) -> SwapForm {
        self.form.read().clone()
    }

    pub fn is_swapping(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn set_slippage(&self, slippage: Slippage) {
        self.form.write().set_slippage(slippage);
    }

    fn connected_account(&self) -> Result<UserAccount> {
        self.session
            .account()
            .ok_or_else(|| ClientError::State("Connect a wallet first".to_string()))
    }

    /// Fetch the token list for the session's chain and price the default pair.
    #[instrument(skip(self))]
    pub async fn load_tokens(&self) -> Result<usize> {
        let account = self.connected_account()?;
        let tokens = self.api.tokens(account.chain_id).await?;
        let count = tokens.len();
        info!(count, chain_id = account.chain_id, "Loaded tokens");

        self.form.write().set_tokens(tokens);
        self.refresh_prices().await?;
        Ok(count)
    }

    /// Refetch the ratio for the current pair.
    ///
    /// Returns `None` while the pair is incomplete. A result that arrives after
    /// the pair changed is dropped.
    pub async fn refresh_prices(&self) -> Result<Option<TokenPrices>> {
        let pair = {
            let form = self.form.read();
            form.pair().map(|(one, two)| (one.address.clone(), two.address.clone()))
        };
        let Some((one, two)) = pair else {
            return Ok(None);
        };

        let prices = self.api.token_prices(&one, &two).await?;
        debug!(ratio = prices.ratio, "Token prices");

        let mut form = self.form.write();
        let unchanged = form
            .pair()
            .is_some_and(|(a, b)| a.address == one && b.address == two);
        if !unchanged {
            return Ok(None);
        }
        form.set_prices(prices);
        Ok(Some(prices))
    }

    pub fn change_amount(&self, value: &str) {
        self.form.write().change_amount(value);
    }

    pub async fn switch_tokens(&self) -> Result<Option<TokenPrices>> {
        self.form.write().switch_tokens();
        self.refresh_prices().await
    }

    pub async fn select_token(&self, side: Side, index: usize) -> Result<Option<TokenPrices>> {
        self.form.write().select_token(side, index)?;
        self.refresh_prices().await
    }

    /// Expected destination amount for the entered amount, formatted for display.
    pub async fn preview_quote(&self) -> Result<String> {
        let account = self.connected_account()?;
        let (one, two, amount) = {
            let form = self.form.read();
            let (one, two) = form
                .pair()
                .ok_or_else(|| ClientError::Validation("Select two tokens".to_string()))?;
            (one.clone(), two.clone(), form.token_one_amount().to_string())
        };
        let raw = raw_amount(&amount, one.decimals)?;

        let quote = self
            .api
            .quote(account.chain_id, &one.address, &two.address, &raw.to_string())
            .await?;
        Ok(display_amount(&quote.dst_amount, two.decimals))
    }

    /// Run the approve-then-swap sequence. Returns the swap transaction hash.
    #[instrument(skip(self))]
    pub async fn execute_swap(&self) -> Result<String> {
        let connected = self.session.is_connected();
        if !self.form.read().can_swap(connected) {
            return Err(if connected {
                ClientError::Validation("Enter an amount".to_string())
            } else {
                ClientError::State("Connect a wallet first".to_string())
            });
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(ClientError::State("A swap is already in progress".to_string()));
        }
        let _guard = InFlight(&self.in_flight);

        self.run_swap().await.map_err(|e| {
            error!(error = %e, "Swap failed");
            ClientError::Swap(Box::new(e))
        })
    }

    async fn run_swap(&self) -> Result<String> {
        let account = self.connected_account()?;
        let (one, two, amount, slippage) = {
            let form = self.form.read();
            let (one, two) = form
                .pair()
                .ok_or_else(|| ClientError::Validation("Select two tokens".to_string()))?;
            (one.clone(), two.clone(), form.token_one_amount().to_string(), form.slippage())
        };
        let raw = raw_amount(&amount, one.decimals)?;
        let wallet = self.session.wallet();

        if !one.is_native() {
            let allowance = self
                .api
                .allowance(account.chain_id, &one.address, &account.account)
                .await?;
            let allowance = U256::from_str(&allowance.allowance)
                .map_err(|e| ClientError::Api(format!("Invalid allowance {}: {}", allowance.allowance, e)))?;

            if allowance < raw {
                info!(%allowance, amount = %raw, token = %one.ticker, "Approval required");
                let approval = self
                    .api
                    .approve_transaction(account.chain_id, &one.address, &raw.to_string())
                    .await?;
                let hash = wallet.send_transaction(&account.account, &approval).await?;
                wallet.wait_for_transaction(&hash).await?;
                info!(%hash, "Approval confirmed");
            }
        }

        let request = SwapRequest {
            chain_id: account.chain_id,
            src: one.address.clone(),
            dst: two.address.clone(),
            amount: raw.to_string(),
            from: account.account.clone(),
            slippage: slippage.percent(),
        };
        let swap = self.api.swap(&request).await?;
        self.form.write().set_destination_amount(&swap.dst_amount);

        let hash = wallet.send_transaction(&account.account, &swap.tx).await?;
        wallet.wait_for_transaction(&hash).await?;
        info!(%hash, from = %one.ticker, to = %two.ticker, "Swap confirmed");

        self.form.write().clear_amounts();
        Ok(hash)
    }
}

/// Entered amount in the token's smallest unit.
///
/// Negative amounts and more fractional digits than the token has are rejected.
fn raw_amount(amount: &str, decimals: u8) -> Result<U256> {
    let trimmed = amount.trim();
    let invalid = |reason: String| ClientError::Validation(format!("Invalid amount {:?}: {}", amount, reason));

    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.len() > decimals as usize {
            return Err(invalid(format!("too many decimals, at most {}", decimals)));
        }
    }

    match parse_units(trimmed, decimals).map_err(|e| invalid(e.to_string()))? {
        ParseUnits::U256(value) => Ok(value),
        ParseUnits::I256(_) => Err(invalid("must not be negative".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;
    use crate::testing::{sample_account, CallLog, FakeApi, FakeWallet};
    use crate::wallet::WalletError;

    struct Harness {
        api: Arc<FakeApi>,
        wallet: Arc<FakeWallet>,
        controller: SwapController,
        log: CallLog,
    }

    async fn harness() -> Harness {
        let log = CallLog::default();
        let api = FakeApi::with_log(log.clone());
        let wallet = FakeWallet::with_log(137, log.clone());
        let store = Arc::new(MemoryStore::with_account(sample_account()));
        let session = Arc::new(SessionManager::new(wallet.clone(), store));
        session.connect().await.unwrap();

        let controller = SwapController::new(api.clone(), session);
        controller.load_tokens().await.unwrap();
        log.lock().clear();

        Harness {
            api,
            wallet,
            controller,
            log,
        }
    }

    fn calls(log: &CallLog) -> Vec<String> {
        log.lock().clone()
    }

    #[tokio::test]
    async fn test_load_tokens_prices_default_pair() {
        let h = harness().await;
        let form = h.controller.form();
        assert_eq!(form.pair().unwrap().0.ticker, "USDC");
        assert!(form.input_enabled());
        assert_eq!(form.prices().unwrap().ratio, 1.0 / 2000.0);
    }

    #[tokio::test]
    async fn test_approval_precedes_swap_when_allowance_low() {
        let h = harness().await;
        h.controller.change_amount("1.5");

        let hash = h.controller.execute_swap().await.unwrap();

        assert_eq!(hash, "0xhash2");
        let usdc = "0x2791bca1f2de4661ed88a30c99a7a9449aa84174";
        assert_eq!(
            calls(&h.log),
            vec![
                format!("allowance:{}", usdc),
                format!("approve_transaction:{}:1500000", usdc),
                "send_transaction:0xapprove".to_string(),
                "wait:0xhash1".to_string(),
                "swap:1500000:2.5".to_string(),
                "send_transaction:0xswap".to_string(),
                "wait:0xhash2".to_string(),
            ]
        );
        let form = h.controller.form();
        assert_eq!(form.token_one_amount(), "");
        assert_eq!(form.token_two_amount(), "");
    }

    #[tokio::test]
    async fn test_sufficient_allowance_skips_approval() {
        let h = harness().await;
        *h.api.allowance.lock() = "1500000".to_string();
        h.controller.change_amount("1.5");

        h.controller.execute_swap().await.unwrap();

        let calls = calls(&h.log);
        assert!(!calls.iter().any(|c| c.starts_with("approve_transaction")));
        assert_eq!(h.wallet.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_native_source_skips_allowance() {
        let h = harness().await;
        h.controller.select_token(Side::One, 2).await.unwrap();
        h.controller.change_amount("1");

        h.controller.execute_swap().await.unwrap();

        let calls = calls(&h.log);
        assert!(!calls.iter().any(|c| c.starts_with("allowance")));
        assert!(calls.contains(&"swap:1000000000000000000:2.5".to_string()));
    }

    #[tokio::test]
    async fn test_swap_failure_aborts_remaining_steps() {
        let h = harness().await;
        *h.api.swap_error.lock() = Some("1inch API request failed".to_string());
        h.controller.set_slippage(Slippage::High);
        h.controller.change_amount("2");

        let err = h.controller.execute_swap().await.unwrap_err();

        assert!(matches!(err, ClientError::Swap(_)));
        assert_eq!(err.user_message(), "Swap transaction failed");
        assert!(!calls(&h.log).contains(&"send_transaction:0xswap".to_string()));
        assert_eq!(h.controller.form().token_one_amount(), "2");
        assert!(!h.controller.is_swapping());
    }

    #[tokio::test]
    async fn test_rejected_approval_stops_before_swap_request() {
        let h = harness().await;
        h.wallet.fail_send(WalletError::Rpc {
            code: 4001,
            message: "User denied transaction signature.".to_string(),
        });
        h.controller.change_amount("1");

        let err = h.controller.execute_swap().await.unwrap_err();

        assert!(matches!(err, ClientError::Swap(_)));
        assert!(!calls(&h.log).iter().any(|c| c.starts_with("swap:")));
    }

    #[test]
    fn test_raw_amount_rejects_negative_and_excess_decimals() {
        assert_eq!(raw_amount("1.5", 6).unwrap(), U256::from(1_500_000u64));
        assert_eq!(raw_amount("1.123456", 6).unwrap(), U256::from(1_123_456u64));
        assert!(matches!(raw_amount("-1.5", 6), Err(ClientError::Validation(_))));
        assert!(matches!(raw_amount("1.1234567", 6), Err(ClientError::Validation(_))));
        assert!(matches!(raw_amount("abc", 6), Err(ClientError::Validation(_))));
    }

    #[tokio::test]
    async fn test_negative_amount_makes_no_calls() {
        let h = harness().await;
        h.controller.change_amount("-1.5");

        let err = h.controller.execute_swap().await.unwrap_err();

        assert!(matches!(err, ClientError::Swap(ref cause) if matches!(**cause, ClientError::Validation(_))));
        assert!(calls(&h.log).is_empty());
        assert!(h.wallet.sent().is_empty());
    }

    #[tokio::test]
    async fn test_excess_decimals_make_no_calls() {
        let h = harness().await;
        h.controller.change_amount("1.1234567");

        let err = h.controller.execute_swap().await.unwrap_err();

        assert!(matches!(err, ClientError::Swap(_)));
        assert!(calls(&h.log).is_empty());
    }

    #[tokio::test]
    async fn test_swap_requires_amount() {
        let h = harness().await;
        let err = h.controller.execute_swap().await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(calls(&h.log).is_empty());
    }

    #[tokio::test]
    async fn test_switch_tokens_refetches_prices() {
        let h = harness().await;
        h.controller.change_amount("3");

        let prices = h.controller.switch_tokens().await.unwrap();

        assert!(prices.is_some());
        assert_eq!(h.controller.form().token_one_amount(), "");
        assert_eq!(
            calls(&h.log),
            vec![
                "token_prices:0x7ceb23fd6bc0add59e62ac25578270cff1b9f619:0x2791bca1f2de4661ed88a30c99a7a9449aa84174"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_preview_quote() {
        let h = harness().await;
        h.controller.select_token(Side::Two, 0).await.unwrap();
        h.controller.select_token(Side::One, 1).await.unwrap();
        h.controller.change_amount("0.5");

        let display = h.controller.preview_quote().await.unwrap();

        assert_eq!(display, "1.23");
        assert!(calls(&h.log).contains(&"quote:500000000000000000".to_string()));
    }
}
