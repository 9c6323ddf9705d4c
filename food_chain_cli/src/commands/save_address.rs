use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use food_chain_onchain::address_store::{AddressBook, DeploymentRecord, DeploymentRegistry};
use food_chain_onchain::artifact::ContractArtifact;
use food_chain_onchain::config::ChainConfig;

#[derive(Args, Debug)]
pub struct SaveAddressArgs {
    /// Contract name used as the map key.
    contract_name: String,

    /// Deployed address to record.
    contract_address: String,

    /// Address book file to merge into.
    #[arg(long, default_value = "contract_address.json")]
    store: PathBuf,

    /// Also record the ABI from this artifact, switching the entry to the
    /// rich deployment-record format (address, abi, timestamp, network).
    #[arg(long)]
    artifact: Option<PathBuf>,
}

pub fn run(args: SaveAddressArgs, config: &ChainConfig) -> Result<()> {
    match args.artifact {
        Some(artifact_path) => {
            let artifact = ContractArtifact::load(&artifact_path)?;
            let record = DeploymentRecord {
                address: args.contract_address,
                abi: artifact.abi_json()?,
                deployed_at: Utc::now(),
                network: config.network.clone(),
            };
            DeploymentRegistry::new(&args.store).record(&args.contract_name, record)?;
        }
        None => {
            AddressBook::new(&args.store).record(&args.contract_name, &args.contract_address)?;
        }
    }
    Ok(())
}
