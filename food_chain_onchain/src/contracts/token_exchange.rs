use std::sync::Arc;

use ethers::abi::Abi;
use ethers::contract::Contract;
use ethers::providers::Middleware;
use ethers::types::{Address, U256};
use tracing::info;

use crate::contracts::{outcome_from_receipt, TxOutcome};
use crate::error::ChainError;

/// Arguments of `createTokenRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
    pub from: Address,
    pub to: Address,
    pub amount: u64,
    pub reason: String,
    pub co2_reduction: u64,
}

/// Dynamic-ABI wrapper over the deployed TokenExchange contract.
pub struct TokenExchange<M> {
    contract: Contract<M>,
}

impl<M: Middleware + 'static> TokenExchange<M> {
    pub fn new(address: Address, abi: Abi, client: Arc<M>) -> Self {
        Self {
            contract: Contract::new(address, abi, client),
        }
    }

    pub async fn create_token_request(
        &self,
        signer: Address,
        request: &TokenRequest,
    ) -> Result<TxOutcome, ChainError> {
        self.send_write(
            "createTokenRequest",
            (
                request.from,
                request.to,
                U256::from(request.amount),
                request.reason.clone(),
                U256::from(request.co2_reduction),
            ),
            signer,
        )
        .await
    }

    pub async fn accept_token_request(
        &self,
        signer: Address,
        request_id: u64,
    ) -> Result<TxOutcome, ChainError> {
        self.send_write("acceptTokenRequest", U256::from(request_id), signer)
            .await
    }

    pub async fn reject_token_request(
        &self,
        signer: Address,
        request_id: u64,
        reason: &str,
    ) -> Result<TxOutcome, ChainError> {
        self.send_write(
            "rejectTokenRequest",
            (U256::from(request_id), reason.to_owned()),
            signer,
        )
        .await
    }

    /// Id of the most recently created request, read back after a create to
    /// report it to the operator.
    pub async fn last_request_id(&self) -> Result<U256, ChainError> {
        self.contract
            .method::<_, U256>("getLastRequestId", ())
            .map_err(|e| ChainError::Contract(e.to_string()))?
            .call()
            .await
            .map_err(|e| ChainError::Contract(e.to_string()))
    }

    async fn send_write<T: ethers::abi::Tokenize>(
        &self,
        method: &str,
        args: T,
        signer: Address,
    ) -> Result<TxOutcome, ChainError> {
        let call = self
            .contract
            .method::<_, ()>(method, args)
            .map_err(|e| ChainError::Contract(e.to_string()))?
            .from(signer);

        let pending = call
            .send()
            .await
            .map_err(|e| ChainError::Contract(e.to_string()))?;
        let tx_hash = pending.tx_hash();
        info!("{method} transaction sent: {tx_hash:?}");

        let receipt = pending
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        outcome_from_receipt(tx_hash, receipt)
    }
}
