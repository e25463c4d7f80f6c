//! In-memory `ApiService` and `WalletProvider` fakes that record their calls.
//!
//! Both fakes can share one [`CallLog`] so tests can assert the order of
//! proxy requests and wallet submissions.

use alloy_primitives::U256;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{
    short_address, AllowanceData, NetworkConfig, QuoteData, SpenderData, SwapData, Token, TokenPrices,
    TransactionData, UserAccount, NATIVE_TOKEN_ADDRESS, POLYGON_NETWORK_NAME,
};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::core::error::{ClientError, Result};
use crate::core::service::{ApiService, SwapRequest};
use crate::wallet::{WalletError, WalletEvent, WalletProvider};

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub const ROUTER: &str = "0x1111111254eeb25477b68fb85ed929f73a960582";

pub fn sample_account() -> UserAccount {
    UserAccount {
        account: FakeWallet::ACCOUNT.to_string(),
        chain_id: 137,
        balance: "12.5".to_string(),
        shortaddress: short_address(FakeWallet::ACCOUNT),
        network_name: POLYGON_NETWORK_NAME.to_string(),
    }
}

pub fn usdc() -> Token {
    Token {
        ticker: "USDC".to_string(),
        name: "USD Coin".to_string(),
        img: None,
        address: "0x2791bca1f2de4661ed88a30c99a7a9449aa84174".to_string(),
        decimals: 6,
    }
}

pub fn weth() -> Token {
    Token {
        ticker: "WETH".to_string(),
        name: "Wrapped Ether".to_string(),
        img: None,
        address: "0x7ceb23fd6bc0add59e62ac25578270cff1b9f619".to_string(),
        decimals: 18,
    }
}

pub fn matic() -> Token {
    Token {
        ticker: "MATIC".to_string(),
        name: "Polygon".to_string(),
        img: None,
        address: NATIVE_TOKEN_ADDRESS.to_string(),
        decimals: 18,
    }
}

fn tx(to: &str, data: &str) -> TransactionData {
    TransactionData {
        from: None,
        to: to.to_string(),
        data: data.to_string(),
        value: "0".to_string(),
        gas: None,
        gas_price: None,
    }
}

// ============================================================================
// Wallet
// ============================================================================

pub struct FakeWallet {
    log: CallLog,
    chain_id: Mutex<u64>,
    balance: Mutex<U256>,
    switch_error: Mutex<Option<WalletError>>,
    send_error: Mutex<Option<WalletError>>,
    sent: Mutex<Vec<TransactionData>>,
    events: broadcast::Sender<WalletEvent>,
}

impl FakeWallet {
    pub const ACCOUNT: &'static str = "0x71c7656ec7ab88b098defb751b7401b5f6d8976f";

    pub fn on_chain(chain_id: u64) -> Arc<Self> {
        Self::with_log(chain_id, CallLog::default())
    }

    pub fn with_log(chain_id: u64, log: CallLog) -> Arc<Self> {
        let (events, _) = broadcast::channel(16);
        Arc::new(Self {
            log,
            chain_id: Mutex::new(chain_id),
            balance: Mutex::new(U256::ZERO),
            switch_error: Mutex::new(None),
            send_error: Mutex::new(None),
            sent: Mutex::new(Vec::new()),
            events,
        })
    }

    pub fn set_balance(&self, wei: U256) {
        *self.balance.lock() = wei;
    }

    pub fn fail_switch(&self, err: WalletError) {
        *self.switch_error.lock() = Some(err);
    }

    pub fn fail_send(&self, err: WalletError) {
        *self.send_error.lock() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    pub fn sent(&self) -> Vec<TransactionData> {
        self.sent.lock().clone()
    }

    pub fn emit(&self, event: WalletEvent) {
        let _ = self.events.send(event);
    }

    fn record(&self, call: impl Into<String>) {
        self.log.lock().push(call.into());
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    async fn chain_id(&self) -> std::result::Result<u64, WalletError> {
        Ok(*self.chain_id.lock())
    }

    async fn request_accounts(&self) -> std::result::Result<Vec<String>, WalletError> {
        self.record("request_accounts");
        Ok(vec![Self::ACCOUNT.to_string()])
    }

    async fn balance(&self, _account: &str) -> std::result::Result<U256, WalletError> {
        Ok(*self.balance.lock())
    }

    async fn switch_chain(&self, chain_id: &str) -> std::result::Result<(), WalletError> {
        self.record(format!("switch_chain:{}", chain_id));
        if let Some(err) = self.switch_error.lock().clone() {
            return Err(err);
        }
        *self.chain_id.lock() = u64::from_str_radix(chain_id.trim_start_matches("0x"), 16).unwrap();
        Ok(())
    }

    async fn add_chain(&self, network: &NetworkConfig) -> std::result::Result<(), WalletError> {
        self.record("add_chain");
        *self.chain_id.lock() = network.chain_id_number();
        Ok(())
    }

    async fn send_transaction(&self, _from: &str, tx: &TransactionData) -> std::result::Result<String, WalletError> {
        self.record(format!("send_transaction:{}", tx.data));
        if let Some(err) = self.send_error.lock().clone() {
            return Err(err);
        }
        let mut sent = self.sent.lock();
        sent.push(tx.clone());
        Ok(format!("0xhash{}", sent.len()))
    }

    async fn wait_for_transaction(&self, hash: &str) -> std::result::Result<(), WalletError> {
        self.record(format!("wait:{}", hash));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }
}

// ============================================================================
// Proxy API
// ============================================================================

pub struct FakeApi {
    log: CallLog,
    pub tokens: Mutex<Vec<Token>>,
    pub prices: Mutex<TokenPrices>,
    pub allowance: Mutex<String>,
    pub dst_amount: Mutex<String>,
    pub swap_error: Mutex<Option<String>>,
}

impl FakeApi {
    pub fn with_log(log: CallLog) -> Arc<Self> {
        Arc::new(Self {
            log,
            tokens: Mutex::new(vec![usdc(), weth(), matic()]),
            prices: Mutex::new(TokenPrices::new(1.0, 2000.0)),
            allowance: Mutex::new("0".to_string()),
            dst_amount: Mutex::new("1234567".to_string()),
            swap_error: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.log.lock().push(call.into());
    }
}

#[async_trait]
impl ApiService for FakeApi {
    async fn token_prices(&self, address_one: &str, address_two: &str) -> Result<TokenPrices> {
        self.record(format!("token_prices:{}:{}", address_one, address_two));
        Ok(*self.prices.lock())
    }

    async fn tokens(&self, chain_id: u64) -> Result<Vec<Token>> {
        self.record(format!("tokens:{}", chain_id));
        Ok(self.tokens.lock().clone())
    }

    async fn spender(&self, _chain_id: u64) -> Result<SpenderData> {
        self.record("spender");
        Ok(SpenderData {
            address: ROUTER.to_string(),
        })
    }

    async fn allowance(&self, _chain_id: u64, token_address: &str, _wallet_address: &str) -> Result<AllowanceData> {
        self.record(format!("allowance:{}", token_address));
        Ok(AllowanceData {
            allowance: self.allowance.lock().clone(),
        })
    }

    async fn approve_transaction(&self, _chain_id: u64, token_address: &str, amount: &str) -> Result<TransactionData> {
        self.record(format!("approve_transaction:{}:{}", token_address, amount));
        Ok(tx(token_address, "0xapprove"))
    }

    async fn swap(&self, request: &SwapRequest) -> Result<SwapData> {
        self.record(format!("swap:{}:{}", request.amount, request.slippage));
        if let Some(msg) = self.swap_error.lock().clone() {
            return Err(ClientError::Api(msg));
        }
        Ok(SwapData {
            dst_amount: self.dst_amount.lock().clone(),
            tx: tx(ROUTER, "0xswap"),
        })
    }

    async fn quote(&self, _chain_id: u64, _src: &str, _dst: &str, amount: &str) -> Result<QuoteData> {
        self.record(format!("quote:{}", amount));
        Ok(QuoteData {
            dst_amount: self.dst_amount.lock().clone(),
        })
    }
}
