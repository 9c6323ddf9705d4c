use std::sync::Arc;

use ethers::providers::{Http, Middleware, Provider};
use ethers::types::{Address, U64};
use tracing::warn;

use crate::config::ChainConfig;
use crate::error::ChainError;

/// The one supported client construction. The `Middleware` trait is the seam:
/// everything downstream is generic over it, so supporting another client
/// major version means another constructor here, not scattered version
/// checks at call sites.
pub type HttpClient = Provider<Http>;

pub fn connect(config: &ChainConfig) -> Result<Arc<HttpClient>, ChainError> {
    let provider =
        Provider::<Http>::try_from(config.rpc_url.as_str()).map_err(|source| {
            ChainError::InvalidEndpoint {
                url: config.rpc_url.clone(),
                source,
            }
        })?;
    Ok(Arc::new(provider))
}

/// Connectivity check; the current block number doubles as a useful log line.
pub async fn current_block<M: Middleware>(client: &M) -> Result<U64, ChainError> {
    client
        .get_block_number()
        .await
        .map_err(|e| ChainError::Rpc(e.to_string()))
}

/// Pick the account that will sign. The node manages its own unlocked dev
/// accounts, so "resolving a signer" is just choosing an address to put in
/// the `from` field.
pub async fn resolve_signer<M: Middleware>(
    client: &M,
    target: Option<Address>,
) -> Result<Address, ChainError> {
    let accounts = client
        .get_accounts()
        .await
        .map_err(|e| ChainError::Rpc(e.to_string()))?;
    select_account(&accounts, target)
}

/// Linear scan for the target account, falling back to index 0 when it is
/// absent. Matching is case-insensitive: addresses arrive here already parsed
/// to `H160`, so any hex casing of the same account compares equal.
pub fn select_account(
    accounts: &[Address],
    target: Option<Address>,
) -> Result<Address, ChainError> {
    let first = *accounts.first().ok_or(ChainError::NoAccounts)?;
    let selected = match target {
        Some(wanted) => match accounts.iter().copied().find(|account| *account == wanted) {
            Some(found) => found,
            None => {
                warn!("account {wanted:?} not exposed by the node, falling back to {first:?}");
                first
            }
        },
        None => first,
    };
    Ok(selected)
}
