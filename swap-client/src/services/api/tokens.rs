use shared::Token;

use super::client::ApiClient;
use crate::core::error::Result;

/// Token list for `chain_id`, in the order the proxy returns it.
pub async fn get_tokens(client: &ApiClient, chain_id: u64) -> Result<Vec<Token>> {
    client.get_envelope("/tokens", &[("chainId", chain_id)]).await
}
