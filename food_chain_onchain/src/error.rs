use std::path::PathBuf;

use ethers::types::{H256, U64};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("invalid RPC endpoint `{url}`: {source}")]
    InvalidEndpoint {
        url: String,
        source: url::ParseError,
    },

    #[error("RPC request failed: {0}")]
    Rpc(String),

    #[error("node exposed no accounts")]
    NoAccounts,

    #[error("could not read artifact `{path}`: {source}")]
    ArtifactRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed artifact `{path}`: {source}")]
    ArtifactParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("contract call failed: {0}")]
    Contract(String),

    #[error("transaction {tx_hash:?} was dropped before inclusion")]
    TxDropped { tx_hash: H256 },

    #[error("transaction {tx_hash:?} reverted in block {block_number}")]
    TxReverted { tx_hash: H256, block_number: U64 },

    #[error("could not access address book `{path}`: {source}")]
    StoreIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
