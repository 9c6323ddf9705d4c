use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ethers::types::Address;
use food_chain_onchain::artifact::ContractArtifact;
use food_chain_onchain::client;
use food_chain_onchain::config::{
    ChainConfig, DEFAULT_TOKEN_EXCHANGE_ADDRESS, DEFAULT_TOKEN_EXCHANGE_ARTIFACT,
};
use food_chain_onchain::contracts::token_exchange::TokenExchange;
use tracing::info;

#[derive(Args, Debug)]
pub struct RejectTokenRequestArgs {
    /// Id of the request to reject.
    request_id: u64,

    /// Reason recorded with the rejection.
    #[arg(default_value = "Request rejected by the user")]
    reason: String,

    /// Deployed TokenExchange contract address.
    #[arg(long, default_value = DEFAULT_TOKEN_EXCHANGE_ADDRESS)]
    contract: Address,

    /// Hardhat build artifact to load the contract ABI from.
    #[arg(long, default_value = DEFAULT_TOKEN_EXCHANGE_ARTIFACT)]
    artifact: PathBuf,

    /// Account to send from; falls back to the node's first account.
    #[arg(long)]
    signer: Option<Address>,
}

pub async fn run(args: RejectTokenRequestArgs, config: &ChainConfig) -> Result<()> {
    let artifact = ContractArtifact::load(&args.artifact)?;

    let client = super::connected_client(config).await?;
    let signer = client::resolve_signer(client.as_ref(), args.signer).await?;
    let exchange = TokenExchange::new(args.contract, artifact.abi, client);

    let tx = exchange
        .reject_token_request(signer, args.request_id, &args.reason)
        .await?;
    info!(
        "token request {} rejected in block {} (status {})",
        args.request_id, tx.block_number, tx.status
    );
    Ok(())
}
