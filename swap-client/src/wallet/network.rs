//! Network switch flow.
//!
//! Asks the wallet to switch to the supported network. Rejections and
//! pending requests are reported, not retried. An unrecognized chain is
//! answered by offering to add it.

use shared::NetworkConfig;
use tracing::{error, info, warn};

use super::{WalletError, WalletProvider};

/// How a network switch attempt ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SwitchOutcome {
    Switched,
    /// The chain was unknown to the wallet and has been added
    Added,
    /// User declined (code 4001)
    Rejected,
    /// A switch request is already waiting for the user
    Pending,
    Failed(WalletError),
}

impl SwitchOutcome {
    /// Whether the wallet should now be on the requested network.
    pub fn is_success(&self) -> bool {
        matches!(self, SwitchOutcome::Switched | SwitchOutcome::Added)
    }
}

/// Switch the wallet to `network`, adding it first if the wallet does not know it.
pub async fn switch_network(wallet: &dyn WalletProvider, network: &NetworkConfig) -> SwitchOutcome {
    info!(chain_id = network.chain_id, name = network.chain_name, "Switching network");

    let err = match wallet.switch_chain(network.chain_id).await {
        Ok(()) => {
            info!("Switched to {}", network.chain_name);
            return SwitchOutcome::Switched;
        }
        Err(err) => err,
    };

    if err.is_user_rejection() {
        warn!("User rejected the chain switching request");
        SwitchOutcome::Rejected
    } else if err.is_already_pending() {
        warn!("A chain switching request is already pending");
        SwitchOutcome::Pending
    } else if err.is_unrecognized_chain() {
        info!("Network not available in wallet, adding it");
        match wallet.add_chain(network).await {
            Ok(()) => SwitchOutcome::Added,
            Err(add_err) => {
                error!(error = %add_err, "Failed to add network");
                SwitchOutcome::Failed(add_err)
            }
        }
    } else {
        error!(error = %err, "Network switch failed");
        SwitchOutcome::Failed(err)
    }
}
