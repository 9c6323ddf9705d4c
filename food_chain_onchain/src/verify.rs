use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ChainError;

/// How hard to try confirming that a mined state change is visible to reads.
/// Replaces the historical "sleep two seconds and read once": same bounded,
/// best-effort character, but probing instead of hoping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverifyPolicy {
    pub attempts: u32,
    pub initial_delay: Duration,
}

impl Default for ReverifyPolicy {
    fn default() -> Self {
        Self {
            attempts: 4,
            initial_delay: Duration::from_millis(250),
        }
    }
}

impl ReverifyPolicy {
    pub fn disabled() -> Self {
        Self {
            attempts: 0,
            initial_delay: Duration::ZERO,
        }
    }
}

/// Poll `probe` until it reports the expected state or the policy is
/// exhausted, doubling the delay between attempts. Probe errors are logged
/// and count as a failed attempt; the receipt remains the authoritative
/// success signal, so the caller treats `false` as a warning at most.
pub async fn await_visibility<F, Fut>(policy: &ReverifyPolicy, mut probe: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ChainError>>,
{
    let mut delay = policy.initial_delay;
    for attempt in 1..=policy.attempts {
        tokio::time::sleep(delay).await;
        match probe().await {
            Ok(true) => return true,
            Ok(false) => debug!(attempt, "state change not visible yet"),
            Err(e) => warn!(attempt, "re-verification read failed: {e}"),
        }
        delay *= 2;
    }
    false
}
