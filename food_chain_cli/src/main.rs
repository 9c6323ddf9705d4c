mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use food_chain_onchain::config::ChainConfig;

#[derive(Parser, Debug)]
#[command(
    name = "foodchain",
    version,
    about = "Interact with the Sustainable Food Chain contracts on a local node"
)]
struct Cli {
    /// JSON-RPC endpoint of the node (defaults to RPC_URL or the local dev node).
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Network label recorded in deployment files (defaults to NETWORK or "localhost").
    #[arg(long, global = true)]
    network: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register a company in the SustainableFoodChain registry.
    RegisterCompany(commands::register_company::RegisterCompanyArgs),

    /// Open a CO2 token exchange request.
    CreateTokenRequest(commands::create_token_request::CreateTokenRequestArgs),

    /// Accept a pending token exchange request.
    AcceptTokenRequest(commands::accept_token_request::AcceptTokenRequestArgs),

    /// Reject a pending token exchange request.
    RejectTokenRequest(commands::reject_token_request::RejectTokenRequestArgs),

    /// Record a deployed contract address in the address book.
    SaveAddress(commands::save_address::SaveAddressArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ChainConfig::load();
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(network) = cli.network {
        config.network = network;
    }

    match cli.command {
        Commands::RegisterCompany(args) => commands::register_company::run(args, &config).await,
        Commands::CreateTokenRequest(args) => {
            commands::create_token_request::run(args, &config).await
        }
        Commands::AcceptTokenRequest(args) => {
            commands::accept_token_request::run(args, &config).await
        }
        Commands::RejectTokenRequest(args) => {
            commands::reject_token_request::run(args, &config).await
        }
        Commands::SaveAddress(args) => commands::save_address::run(args, &config),
    }
}
