use std::sync::Arc;

use async_trait::async_trait;
use ethers::abi::Abi;
use ethers::contract::Contract;
use ethers::providers::Middleware;
use ethers::types::Address;
use tracing::info;

use crate::contracts::{outcome_from_receipt, TxOutcome};
use crate::error::ChainError;

/// Arguments of `registerCompany`. The type code is the contract-side enum:
/// 0=Producer, 1=Processor, 2=Distributor, 3=Retailer, 4=Other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInfo {
    pub name: String,
    pub company_type: u8,
    pub location: String,
    /// JSON-encoded certification list, passed through to the contract as-is.
    pub certifications: String,
}

/// The registration surface of a company registry, abstracted so the
/// registration flow can be driven without a node.
#[async_trait]
pub trait CompanyRegistrar {
    async fn is_registered(&self, company: Address) -> Result<bool, ChainError>;

    async fn register_company(
        &self,
        from: Address,
        info: &CompanyInfo,
    ) -> Result<TxOutcome, ChainError>;
}

/// Dynamic-ABI wrapper over the deployed SustainableFoodChain registry. The
/// ABI comes from the build artifact at runtime, so the wrapper works against
/// whatever artifact the operator points it at.
pub struct CompanyRegistry<M> {
    contract: Contract<M>,
}

impl<M: Middleware + 'static> CompanyRegistry<M> {
    pub fn new(address: Address, abi: Abi, client: Arc<M>) -> Self {
        Self {
            contract: Contract::new(address, abi, client),
        }
    }
}

#[async_trait]
impl<M: Middleware + 'static> CompanyRegistrar for CompanyRegistry<M> {
    async fn is_registered(&self, company: Address) -> Result<bool, ChainError> {
        self.contract
            .method::<_, bool>("isRegistered", company)
            .map_err(|e| ChainError::Contract(e.to_string()))?
            .call()
            .await
            .map_err(|e| ChainError::Contract(e.to_string()))
    }

    async fn register_company(
        &self,
        from: Address,
        info: &CompanyInfo,
    ) -> Result<TxOutcome, ChainError> {
        let call = self
            .contract
            .method::<_, ()>(
                "registerCompany",
                (
                    info.name.clone(),
                    info.company_type,
                    info.location.clone(),
                    info.certifications.clone(),
                ),
            )
            .map_err(|e| ChainError::Contract(e.to_string()))?
            .from(from);

        let pending = call
            .send()
            .await
            .map_err(|e| ChainError::Contract(e.to_string()))?;
        let tx_hash = pending.tx_hash();
        info!("registerCompany transaction sent: {tx_hash:?}");

        let receipt = pending
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        outcome_from_receipt(tx_hash, receipt)
    }
}
