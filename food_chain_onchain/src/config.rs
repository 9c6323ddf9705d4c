use std::env;

const RPC_URL_ENV_VAR: &str = "RPC_URL";
const NETWORK_ENV_VAR: &str = "NETWORK";

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const DEFAULT_NETWORK: &str = "localhost";

/// Hardhat deploys deterministically, so the first contracts of a fresh local
/// node always land on the same addresses.
pub const DEFAULT_FOOD_CHAIN_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const DEFAULT_TOKEN_EXCHANGE_ADDRESS: &str = "0xCf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9";

pub const DEFAULT_FOOD_CHAIN_ARTIFACT: &str =
    "artifacts/contracts/SustainableFoodChain.sol/SustainableFoodChain.json";
pub const DEFAULT_TOKEN_EXCHANGE_ARTIFACT: &str =
    "artifacts/contracts/TokenExchange.sol/TokenExchange.json";

#[derive(Clone, Debug, PartialEq)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub network: String,
}

impl ChainConfig {
    /// Load from env (and any `.env` file), falling back to the local
    /// development node defaults.
    pub fn load() -> Self {
        dotenv::dotenv().ok();

        Self {
            rpc_url: env::var(RPC_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
            network: env::var(NETWORK_ENV_VAR).unwrap_or_else(|_| DEFAULT_NETWORK.to_string()),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            network: DEFAULT_NETWORK.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_node() {
        let config = ChainConfig::default();
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.network, "localhost");
    }
}
