use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ethers::types::Address;
use food_chain_onchain::artifact::ContractArtifact;
use food_chain_onchain::client;
use food_chain_onchain::config::{
    ChainConfig, DEFAULT_TOKEN_EXCHANGE_ADDRESS, DEFAULT_TOKEN_EXCHANGE_ARTIFACT,
};
use food_chain_onchain::contracts::token_exchange::{TokenExchange, TokenRequest};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct CreateTokenRequestArgs {
    /// Company asking for the tokens.
    from: Address,

    /// Company the tokens are requested from.
    to: Address,

    /// Number of tokens requested.
    #[arg(default_value_t = 6)]
    amount: u64,

    /// Why the tokens are requested.
    #[arg(default_value = "CO2 emission reduction across the food chain")]
    reason: String,

    /// Claimed CO2 reduction backing the request.
    #[arg(default_value_t = 100)]
    co2_reduction: u64,

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

pub async fn run(args: CreateTokenRequestArgs, config: &ChainConfig) -> Result<()> {
    let artifact = ContractArtifact::load(&args.artifact)?;

    let client = super::connected_client(config).await?;
    let signer = client::resolve_signer(client.as_ref(), args.signer).await?;
    let exchange = TokenExchange::new(args.contract, artifact.abi, client);

    let request = TokenRequest {
        from: args.from,
        to: args.to,
        amount: args.amount,
        reason: args.reason,
        co2_reduction: args.co2_reduction,
    };

    let tx = exchange.create_token_request(signer, &request).await?;
    info!(
        "token request confirmed in block {} (status {})",
        tx.block_number, tx.status
    );

    // The receipt already proved the write; a failed read-back only costs us
    // the id in the log.
    match exchange.last_request_id().await {
        Ok(id) => info!("created token request id {id}"),
        Err(e) => warn!("could not read back the new request id: {e}"),
    }
    Ok(())
}
