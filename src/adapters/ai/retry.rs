//! Retry policy for AI provider calls.
//!
//! The policy is data: attempt count, base delay, and a multiplier for
//! exponential backoff. The `attempt` helper owns the loop so the
//! orchestrator only describes the operation and which errors are worth
//! retrying.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Exponential backoff retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Never zero.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub base_delay: Duration,
    /// Backoff growth factor per attempt.
    pub multiplier: u32,
}

impl RetryPolicy {
    /// Creates a policy with doubling backoff.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            multiplier: 2,
        }
    }

    /// A single attempt, no retries.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Delay before the given retry (1 = delay after the first failure).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.multiplier.saturating_pow(retry.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// Runs `operation` until it succeeds, returns a non-retryable error,
    /// or attempts are exhausted. `is_retryable` decides which errors are
    /// worth another attempt.
    pub async fn attempt<T, E, F, Fut, R>(
        &self,
        mut operation: F,
        is_retryable: R,
    ) -> Result<T, AttemptOutcome<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        R: Fn(&E) -> bool,
    {
        let mut attempts_made = 0;
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            attempts_made = attempt;
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let retryable = is_retryable(&err);
                    last_error = Some(err);
                    if !retryable {
                        break;
                    }
                    if attempt < self.max_attempts {
                        let delay = self.delay_for(attempt);
                        debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying after failure");
                        sleep(delay).await;
                    }
                }
            }
        }

        // max_attempts >= 1, so at least one error was recorded
        Err(AttemptOutcome {
            error: last_error.expect("at least one attempt was made"),
            attempts: attempts_made,
        })
    }
}

/// Terminal failure of an attempt loop.
#[derive(Debug)]
pub struct AttemptOutcome<E> {
    /// The last error observed.
    pub error: E,
    /// Attempts actually made before giving up.
    pub attempts: u32,
}
