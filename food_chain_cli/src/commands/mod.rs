pub mod accept_token_request;
pub mod create_token_request;
pub mod register_company;
pub mod reject_token_request;
pub mod save_address;

use std::sync::Arc;

use anyhow::Result;
use food_chain_onchain::client::{self, HttpClient};
use food_chain_onchain::config::ChainConfig;
use tracing::info;

/// Build the provider and prove connectivity before any command proceeds.
pub(crate) async fn connected_client(config: &ChainConfig) -> Result<Arc<HttpClient>> {
    let client = client::connect(config)?;
    let block = client::current_block(client.as_ref()).await?;
    info!("connected to {} (block {block})", config.rpc_url);
    Ok(client)
}
