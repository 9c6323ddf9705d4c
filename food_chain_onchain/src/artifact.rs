use std::fs;
use std::path::Path;

use ethers::abi::Abi;
use serde::Deserialize;

use crate::error::ChainError;

/// The slice of a Hardhat build artifact we care about. Everything beyond the
/// `abi` (bytecode, source maps, ...) is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    #[serde(default)]
    pub contract_name: Option<String>,
    pub abi: Abi,
}

impl ContractArtifact {
    /// Read and parse an artifact file. A missing file or JSON without a
    /// well-formed `abi` field is fatal; callers must not touch the network
    /// after this fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChainError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ChainError::ArtifactRead {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ChainError::ArtifactParse {
            path: path.to_owned(),
            source,
        })
    }

    /// The ABI as raw JSON, for persisting alongside a deployed address.
    pub fn abi_json(&self) -> Result<serde_json::Value, ChainError> {
        Ok(serde_json::to_value(&self.abi)?)
    }
}
