pub mod company_registry;
pub mod token_exchange;

use ethers::types::{TransactionReceipt, H256, U64};

use crate::error::ChainError;

/// What we report once a state-changing call has been mined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: H256,
    pub block_number: U64,
    pub status: u64,
}

pub(crate) fn outcome_from_receipt(
    tx_hash: H256,
    receipt: Option<TransactionReceipt>,
) -> Result<TxOutcome, ChainError> {
    let receipt = receipt.ok_or(ChainError::TxDropped { tx_hash })?;
    let block_number = receipt.block_number.unwrap_or_default();
    // Status is only absent on pre-Byzantium chains; inclusion counts as
    // success there.
    let status = receipt.status.map_or(1, |s| s.as_u64());
    if status == 0 {
        return Err(ChainError::TxReverted {
            tx_hash,
            block_number,
        });
    }
    Ok(TxOutcome {
        tx_hash,
        block_number,
        status,
    })
}

#[cfg(test)]
mod tests {
    use ethers::types::U256;

    use super::*;

    fn receipt(status: u64, block: u64) -> TransactionReceipt {
        TransactionReceipt {
            status: Some(U64::from(status)),
            block_number: Some(U64::from(block)),
            cumulative_gas_used: U256::zero(),
            ..Default::default()
        }
    }

    #[test]
    fn successful_receipt_maps_to_outcome() {
        let hash = H256::repeat_byte(1);
        let outcome = outcome_from_receipt(hash, Some(receipt(1, 7))).unwrap();
        assert_eq!(
            outcome,
            TxOutcome {
                tx_hash: hash,
                block_number: U64::from(7),
                status: 1,
            }
        );
    }

    #[test]
    fn missing_receipt_means_dropped() {
        let err = outcome_from_receipt(H256::repeat_byte(2), None).unwrap_err();
        assert!(matches!(err, ChainError::TxDropped { .. }));
    }

    #[test]
    fn zero_status_means_reverted() {
        let err = outcome_from_receipt(H256::repeat_byte(3), Some(receipt(0, 9))).unwrap_err();
        assert!(matches!(err, ChainError::TxReverted { .. }));
    }
}
