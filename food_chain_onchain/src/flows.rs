use ethers::types::Address;
use tracing::{info, warn};

use crate::contracts::company_registry::{CompanyInfo, CompanyRegistrar};
use crate::contracts::TxOutcome;
use crate::error::ChainError;
use crate::verify::{await_visibility, ReverifyPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The pre-check found the company already registered; no transaction
    /// was submitted.
    AlreadyRegistered,
    Registered(TxOutcome),
}

/// Register `company` unless it already is. The pre-check read is optimistic:
/// if it fails we log and attempt the registration anyway, and if the
/// post-receipt re-verification never sees the new state we only warn, since
/// the receipt has already confirmed the write.
pub async fn register_company<R: CompanyRegistrar + Sync>(
    registry: &R,
    signer: Address,
    company: Address,
    info: &CompanyInfo,
    reverify: &ReverifyPolicy,
) -> Result<RegisterOutcome, ChainError> {
    match registry.is_registered(company).await {
        Ok(true) => {
            info!("company {company:?} is already registered");
            return Ok(RegisterOutcome::AlreadyRegistered);
        }
        Ok(false) => {}
        Err(e) => warn!("registration pre-check failed, attempting anyway: {e}"),
    }

    info!(
        "registering company {name:?} (type {company_type}) as {company:?}",
        name = info.name,
        company_type = info.company_type
    );
    let outcome = registry.register_company(signer, info).await?;
    info!(
        "registration confirmed in block {} (status {})",
        outcome.block_number, outcome.status
    );

    let visible = await_visibility(reverify, || registry.is_registered(company)).await;
    if !visible {
        warn!(
            "registration of {company:?} confirmed but not yet visible to reads; \
             trusting the receipt"
        );
    }

    Ok(RegisterOutcome::Registered(outcome))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use ethers::types::{H256, U64};

    use super::*;

    fn info() -> CompanyInfo {
        CompanyInfo {
            name: "acme farm".into(),
            company_type: 0,
            location: "valley".into(),
            certifications: "{}".into(),
        }
    }

    fn quick_policy() -> ReverifyPolicy {
        ReverifyPolicy {
            attempts: 2,
            initial_delay: Duration::from_millis(1),
        }
    }

    fn outcome() -> TxOutcome {
        TxOutcome {
            tx_hash: H256::repeat_byte(7),
            block_number: U64::from(12),
            status: 1,
        }
    }

    /// Scripted registrar: answers pre-check probes from a list, counts
    /// submitted writes.
    struct ScriptedRegistrar {
        reads: Vec<Result<bool, ()>>,
        read_cursor: AtomicUsize,
        writes: AtomicUsize,
        write_fails: bool,
    }

    impl ScriptedRegistrar {
        fn new(reads: Vec<Result<bool, ()>>) -> Self {
            Self {
                reads,
                read_cursor: AtomicUsize::new(0),
                writes: AtomicUsize::new(0),
                write_fails: false,
            }
        }

        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompanyRegistrar for ScriptedRegistrar {
        async fn is_registered(&self, _company: Address) -> Result<bool, ChainError> {
            let idx = self.read_cursor.fetch_add(1, Ordering::SeqCst);
            // Past the script, keep repeating the last answer.
            let scripted = self
                .reads
                .get(idx)
                .or_else(|| self.reads.last())
                .copied()
                .unwrap_or(Ok(false));
            scripted.map_err(|_| ChainError::Rpc("read refused".into()))
        }

        async fn register_company(
            &self,
            _from: Address,
            _info: &CompanyInfo,
        ) -> Result<TxOutcome, ChainError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.write_fails {
                return Err(ChainError::Contract("execution reverted".into()));
            }
            Ok(outcome())
        }
    }

    #[tokio::test]
    async fn already_registered_short_circuits_without_a_write() {
        let registrar = ScriptedRegistrar::new(vec![Ok(true)]);
        let result = register_company(
            &registrar,
            Address::zero(),
            Address::repeat_byte(0x0c),
            &info(),
            &quick_policy(),
        )
        .await
        .unwrap();

        assert_eq!(result, RegisterOutcome::AlreadyRegistered);
        assert_eq!(registrar.writes(), 0);
    }

    #[tokio::test]
    async fn unregistered_company_gets_exactly_one_write() {
        let registrar = ScriptedRegistrar::new(vec![Ok(false), Ok(true)]);
        let result = register_company(
            &registrar,
            Address::zero(),
            Address::repeat_byte(0x0c),
            &info(),
            &quick_policy(),
        )
        .await
        .unwrap();

        assert_eq!(result, RegisterOutcome::Registered(outcome()));
        assert_eq!(registrar.writes(), 1);
    }

    #[tokio::test]
    async fn failed_pre_check_still_attempts_the_registration() {
        let registrar = ScriptedRegistrar::new(vec![Err(()), Ok(true)]);
        let result = register_company(
            &registrar,
            Address::zero(),
            Address::repeat_byte(0x0c),
            &info(),
            &quick_policy(),
        )
        .await
        .unwrap();

        assert!(matches!(result, RegisterOutcome::Registered(_)));
        assert_eq!(registrar.writes(), 1);
    }

    #[tokio::test]
    async fn reverification_never_seeing_the_change_is_still_success() {
        let registrar = ScriptedRegistrar::new(vec![Ok(false), Ok(false), Ok(false)]);
        let result = register_company(
            &registrar,
            Address::zero(),
            Address::repeat_byte(0x0c),
            &info(),
            &quick_policy(),
        )
        .await
        .unwrap();

        assert_eq!(result, RegisterOutcome::Registered(outcome()));
    }

    #[tokio::test]
    async fn write_failure_propagates() {
        let mut registrar = ScriptedRegistrar::new(vec![Ok(false)]);
        registrar.write_fails = true;
        let err = register_company(
            &registrar,
            Address::zero(),
            Address::repeat_byte(0x0c),
            &info(),
            &quick_policy(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ChainError::Contract(_)));
    }
}
