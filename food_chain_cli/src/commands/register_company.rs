use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ethers::types::Address;
use food_chain_onchain::artifact::ContractArtifact;
use food_chain_onchain::client;
use food_chain_onchain::config::{ChainConfig, DEFAULT_FOOD_CHAIN_ADDRESS, DEFAULT_FOOD_CHAIN_ARTIFACT};
use food_chain_onchain::contracts::company_registry::{CompanyInfo, CompanyRegistry};
use food_chain_onchain::flows::{self, RegisterOutcome};
use food_chain_onchain::verify::ReverifyPolicy;
use tracing::info;

#[derive(Args, Debug)]
pub struct RegisterCompanyArgs {
    /// Company identity to register (and pre-check).
    #[arg(default_value = "0x000000000000000000000000000000000000000c")]
    company: Address,

    /// Display name of the company.
    #[arg(default_value = "a")]
    name: String,

    /// Company type code (0=Producer, 1=Processor, 2=Distributor, 3=Retailer, 4=Other).
    #[arg(default_value_t = 1)]
    company_type: u8,

    /// Location label.
    #[arg(default_value = "r")]
    location: String,

    /// JSON-encoded certification list, passed through verbatim.
    #[arg(default_value = "{}")]
    certifications: String,

    /// Deployed SustainableFoodChain contract address.
    #[arg(long, default_value = DEFAULT_FOOD_CHAIN_ADDRESS)]
    contract: Address,

    /// Hardhat build artifact to load the contract ABI from.
    #[arg(long, default_value = DEFAULT_FOOD_CHAIN_ARTIFACT)]
    artifact: PathBuf,

    /// Account to send from; falls back to the node's first account.
    #[arg(long)]
    signer: Option<Address>,
}

pub async fn run(args: RegisterCompanyArgs, config: &ChainConfig) -> Result<()> {
    // Artifact problems must surface before we touch the network.
    let artifact = ContractArtifact::load(&args.artifact)?;

    let client = super::connected_client(config).await?;
    let signer = client::resolve_signer(client.as_ref(), args.signer).await?;
    let registry = CompanyRegistry::new(args.contract, artifact.abi, client);

    let info = CompanyInfo {
        name: args.name,
        company_type: args.company_type,
        location: args.location,
        certifications: args.certifications,
    };

    let outcome = flows::register_company(
        &registry,
        signer,
        args.company,
        &info,
        &ReverifyPolicy::default(),
    )
    .await?;

    match outcome {
        RegisterOutcome::AlreadyRegistered => {
            info!("nothing to do: {company:?} was already registered", company = args.company)
        }
        RegisterOutcome::Registered(tx) => info!(
            "company registered in block {} (status {})",
            tx.block_number, tx.status
        ),
    }
    Ok(())
}
