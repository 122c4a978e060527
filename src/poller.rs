//! Call-status polling with a fixed attempt budget.

use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Statuses after which the telephony provider will not change the call again.
pub const TERMINAL_STATUSES: [&str; 5] = ["completed", "failed", "busy", "no-answer", "canceled"];

pub fn is_terminal(status: &str) -> bool {
    TERMINAL_STATUSES.iter().any(|s| *s == status)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    /// 12 attempts, 5 seconds apart: one minute at most.
    fn default() -> Self {
        Self {
            max_attempts: 12,
            interval: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollOutcome {
    /// One entry per query; `None` where the query failed.
    pub observed: Vec<Option<String>>,
}

impl PollOutcome {
    /// Last observed status, terminal or not.
    pub fn final_status(&self) -> Option<&str> {
        self.observed.last().and_then(|s| s.as_deref())
    }

    pub fn reached_terminal(&self) -> bool {
        self.final_status().is_some_and(is_terminal)
    }
}

/// Query `fetch` until it yields a terminal status or the budget runs out.
///
/// `fetch` reports failure as `None`; it is expected to log the cause itself.
/// Dropping the returned future stops polling.
pub async fn poll_call_status<F, Fut>(policy: PollPolicy, mut fetch: F) -> PollOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<String>>,
{
    let mut outcome = PollOutcome::default();

    for attempt in 1..=policy.max_attempts {
        let status = fetch().await;
        info!(
            "Current call status (attempt {}/{}): {:?}",
            attempt, policy.max_attempts, status
        );

        let terminal = status.as_deref().is_some_and(is_terminal);
        outcome.observed.push(status);

        if terminal || attempt == policy.max_attempts {
            break;
        }
        tokio::time::sleep(policy.interval).await;
    }

    outcome
}
