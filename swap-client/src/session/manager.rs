//! # Session Manager
//!
//! Owns the connection state machine and the persisted account record.
//!
//! ```text
//! Disconnected ──connect──▶ Connecting ──chain ok──▶ Connected
//!                               │
//!                               └─wrong chain─▶ WrongNetwork ──switch ok──▶ Connected
//! ```
//!
//! A session is only `Connected` while the wallet is on the supported
//! network. Any account or chain change reported by the wallet ends the
//! session; the user has to connect again.

use alloy_primitives::utils::format_units;
use parking_lot::RwLock;
use shared::{short_address, NetworkConfig, UserAccount, POLYGON_MAINNET, POLYGON_NETWORK_NAME};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, instrument, warn};

use super::store::SessionStore;
use crate::core::error::Result;
use crate::wallet::{switch_network, SwitchOutcome, WalletError, WalletEvent, WalletProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    /// The wallet is on another chain and the switch did not (yet) succeed
    WrongNetwork,
}

/// Why a session was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInvalidated {
    AccountsChanged,
    ChainChanged(u64),
    /// Events were dropped; the current state is unknown
    EventsLost,
}

/// Every wallet event invalidates the session.
pub fn invalidation_for(event: &WalletEvent) -> SessionInvalidated {
    match event {
        WalletEvent::AccountsChanged(_) => SessionInvalidated::AccountsChanged,
        WalletEvent::ChainChanged(chain_id) => SessionInvalidated::ChainChanged(*chain_id),
    }
}

struct SessionState {
    status: ConnectionStatus,
    account: Option<UserAccount>,
}

pub struct SessionManager {
    wallet: Arc<dyn WalletProvider>,
    store: Arc<dyn SessionStore>,
    network: NetworkConfig,
    network_name: &'static str,
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Manager for Polygon mainnet, the only supported network.
    pub fn new(wallet: Arc<dyn WalletProvider>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            wallet,
            store,
            network: POLYGON_MAINNET,
            network_name: POLYGON_NETWORK_NAME,
            state: RwLock::new(SessionState {
                status: ConnectionStatus::Disconnected,
                account: None,
            }),
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.state.read().status
    }

    pub fn is_connected(&self) -> bool {
        self.status() == ConnectionStatus::Connected
    }

    /// The connected account, if any.
    pub fn account(&self) -> Option<UserAccount> {
        let state = self.state.read();
        match state.status {
            ConnectionStatus::Connected => state.account.clone(),
            _ => None,
        }
    }

    pub fn wallet(&self) -> Arc<dyn WalletProvider> {
        self.wallet.clone()
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    fn set_status(&self, status: ConnectionStatus) {
        debug!(?status, "Session status");
        self.state.write().status = status;
    }

    /// Startup check.
    ///
    /// A stored record for the supported network reconnects silently, without
    /// prompting for accounts. Anything else only asks the wallet to switch
    /// networks and leaves the session disconnected.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<ConnectionStatus> {
        match self.store.load()? {
            Some(record) if record.network_name == self.network_name => {
                info!(account = %record.shortaddress, "Restoring saved session");
                self.connect().await
            }
            _ => {
                self.switch_network().await;
                Ok(self.status())
            }
        }
    }

    /// Connect to the wallet, switching networks first if needed.
    ///
    /// Reuses the stored record when there is one; otherwise requests
    /// accounts, reads the balance and persists a new record.
    #[instrument(skip(self))]
    pub async fn connect(&self) -> Result<ConnectionStatus> {
        self.set_status(ConnectionStatus::Connecting);

        let result = self.try_connect().await;
        if result.is_err() {
            self.set_status(ConnectionStatus::Disconnected);
        }
        result
    }

    async fn try_connect(&self) -> Result<ConnectionStatus> {
        let mut chain_id = self.wallet.chain_id().await?;

        if !self.network.matches(chain_id) {
            warn!(chain_id, expected = self.network.chain_id, "Wallet is on the wrong network");
            self.set_status(ConnectionStatus::WrongNetwork);

            if !self.switch_network().await.is_success() {
                return Ok(ConnectionStatus::WrongNetwork);
            }
            chain_id = self.wallet.chain_id().await?;
            if !self.network.matches(chain_id) {
                return Ok(ConnectionStatus::WrongNetwork);
            }
        }

        let account = match self.store.load()? {
            Some(record) => record,
            None => self.new_account_record(chain_id).await?,
        };

        info!(account = %account.shortaddress, balance = %account.balance, "Wallet connected");
        let mut state = self.state.write();
        state.status = ConnectionStatus::Connected;
        state.account = Some(account);
        Ok(ConnectionStatus::Connected)
    }

    async fn new_account_record(&self, chain_id: u64) -> Result<UserAccount> {
        let accounts = self.wallet.request_accounts().await?;
        let account = accounts.into_iter().next().ok_or(WalletError::NoAccounts)?;

        let wei = self.wallet.balance(&account).await?;
        let balance = format_units(wei, 18u8).map_err(|e| WalletError::InvalidResponse(e.to_string()))?;

        let record = UserAccount {
            shortaddress: short_address(&account),
            account,
            chain_id,
            balance,
            network_name: self.network_name.to_string(),
        };
        self.store.save(&record)?;
        Ok(record)
    }

    /// Ask the wallet to move to the supported network.
    pub async fn switch_network(&self) -> SwitchOutcome {
        switch_network(self.wallet.as_ref(), &self.network).await
    }

    /// Forget the session and its stored record.
    #[instrument(skip(self))]
    pub fn disconnect(&self) -> Result<()> {
        {
            let mut state = self.state.write();
            state.status = ConnectionStatus::Disconnected;
            state.account = None;
        }
        self.store.clear()?;
        info!("Wallet disconnected");
        Ok(())
    }

    /// Apply an invalidation produced by [`invalidation_for`].
    pub fn apply(&self, invalidated: SessionInvalidated) -> Result<()> {
        info!(?invalidated, "Session invalidated");
        self.disconnect()
    }

    /// Invalidate the session on every wallet event until the wallet goes away.
    pub fn watch_events(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let mut events = self.wallet.subscribe();
        tokio::spawn(async move {
            loop {
                let invalidated = match events.recv().await {
                    Ok(event) => invalidation_for(&event),
                    Err(RecvError::Lagged(_)) => SessionInvalidated::EventsLost,
                    Err(RecvError::Closed) => break,
                };
                if let Err(e) = self.apply(invalidated) {
                    warn!(error = %e, "Failed to clear session");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::MemoryStore;
    use crate::testing::{sample_account, FakeWallet};
    use alloy_primitives::U256;

    fn manager(wallet: Arc<FakeWallet>, store: Arc<MemoryStore>) -> SessionManager {
        SessionManager::new(wallet, store)
    }

    #[tokio::test]
    async fn test_restore_reuses_saved_account_without_prompt() {
        let wallet = FakeWallet::on_chain(137);
        let store = Arc::new(MemoryStore::with_account(sample_account()));
        let session = manager(wallet.clone(), store);

        let status = session.restore().await.unwrap();

        assert_eq!(status, ConnectionStatus::Connected);
        assert_eq!(session.account(), Some(sample_account()));
        assert!(!wallet.calls().contains(&"request_accounts".to_string()));
    }

    #[tokio::test]
    async fn test_restore_without_record_only_switches() {
        let wallet = FakeWallet::on_chain(1);
        let session = manager(wallet.clone(), Arc::default());

        let status = session.restore().await.unwrap();

        assert_eq!(status, ConnectionStatus::Disconnected);
        assert!(wallet.calls().contains(&"switch_chain:0x89".to_string()));
    }

    #[tokio::test]
    async fn test_fresh_connect_saves_record() {
        let wallet = FakeWallet::on_chain(137);
        wallet.set_balance(U256::from(1_500_000_000_000_000_000u64));
        let store = Arc::new(MemoryStore::default());
        let session = manager(wallet.clone(), store.clone());

        let status = session.connect().await.unwrap();

        assert_eq!(status, ConnectionStatus::Connected);
        let record = store.load().unwrap().unwrap();
        assert_eq!(record.account, FakeWallet::ACCOUNT);
        assert_eq!(record.shortaddress, "0x71c7...976f");
        assert_eq!(record.chain_id, 137);
        assert_eq!(record.network_name, "PolygonMainnet");
        assert!(record.balance.starts_with("1.5"));
    }

    #[tokio::test]
    async fn test_wrong_network_switches_then_connects() {
        let wallet = FakeWallet::on_chain(1);
        let session = manager(wallet.clone(), Arc::default());

        let status = session.connect().await.unwrap();

        assert_eq!(status, ConnectionStatus::Connected);
        let calls = wallet.calls();
        let switch = calls.iter().position(|c| c == "switch_chain:0x89").unwrap();
        let accounts = calls.iter().position(|c| c == "request_accounts").unwrap();
        assert!(switch < accounts);
    }

    #[tokio::test]
    async fn test_rejected_switch_stays_on_wrong_network() {
        let wallet = FakeWallet::on_chain(1);
        wallet.fail_switch(WalletError::Rpc {
            code: 4001,
            message: "User rejected the request.".to_string(),
        });
        let session = manager(wallet.clone(), Arc::default());

        let status = session.connect().await.unwrap();

        assert_eq!(status, ConnectionStatus::WrongNetwork);
        assert_eq!(session.account(), None);
        assert!(!wallet.calls().iter().any(|c| c == "add_chain"));
    }

    #[tokio::test]
    async fn test_unrecognized_chain_is_added() {
        let wallet = FakeWallet::on_chain(1);
        wallet.fail_switch(WalletError::Rpc {
            code: 4902,
            message: "Unrecognized chain ID".to_string(),
        });
        let session = manager(wallet.clone(), Arc::default());

        let outcome = session.switch_network().await;

        assert_eq!(outcome, SwitchOutcome::Added);
        assert!(wallet.calls().iter().any(|c| c == "add_chain"));
    }

    #[tokio::test]
    async fn test_pending_switch() {
        let wallet = FakeWallet::on_chain(1);
        wallet.fail_switch(WalletError::Rpc {
            code: -32002,
            message: "Request of type 'wallet_switchEthereumChain' already pending".to_string(),
        });
        let session = manager(wallet, Arc::default());

        assert_eq!(session.switch_network().await, SwitchOutcome::Pending);
    }

    #[test]
    fn test_every_event_invalidates() {
        assert_eq!(
            invalidation_for(&WalletEvent::AccountsChanged(vec![])),
            SessionInvalidated::AccountsChanged
        );
        assert_eq!(
            invalidation_for(&WalletEvent::ChainChanged(1)),
            SessionInvalidated::ChainChanged(1)
        );
    }

    #[tokio::test]
    async fn test_wallet_event_clears_session() {
        let wallet = FakeWallet::on_chain(137);
        let store = Arc::new(MemoryStore::with_account(sample_account()));
        let session = Arc::new(manager(wallet.clone(), store.clone()));
        session.connect().await.unwrap();

        let watcher = session.clone().watch_events();
        wallet.emit(WalletEvent::ChainChanged(1));

        for _ in 0..50 {
            if !session.is_connected() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        watcher.abort();

        assert_eq!(session.status(), ConnectionStatus::Disconnected);
        assert_eq!(store.load().unwrap(), None);
    }
}
