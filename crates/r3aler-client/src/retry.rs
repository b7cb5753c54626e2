//! Bounded retry with per-attempt timeout and exponential backoff.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use r3aler_common::ChatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, first try included.
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    /// Wait after the first failure; doubles after each further failure.
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            attempt_timeout: Duration::from_millis(8000),
            initial_backoff: Duration::from_millis(1000),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Delay before the attempt following failed attempt `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// attempts run out. `op` receives the 1-based attempt number.
///
/// Cancelling `cancel` aborts the running attempt or backoff at once and
/// yields `ChatError::Cancelled`. When every attempt failed, a final
/// timeout surfaces as `ChatError::Timeout`; anything else as
/// `ChatError::MaxRetriesExceeded`.
pub async fn retry<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut op: F,
) -> Result<T, ChatError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, ChatError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        if cancel.is_cancelled() {
            return Err(ChatError::Cancelled);
        }

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ChatError::Cancelled),
            result = tokio::time::timeout(policy.attempt_timeout, op(attempt)) => {
                result.unwrap_or(Err(ChatError::Timeout(policy.attempt_timeout)))
            }
        };

        match outcome {
            Ok(value) => {
                if attempt > 1 {
                    debug!(attempt, "chat request succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                warn!(attempt, max_attempts = attempts, error = %e, "chat attempt failed");
                last_error = Some(e);
            }
        }

        if attempt < attempts {
            let delay = policy.backoff(attempt);
            debug!(delay_ms = delay.as_millis() as u64, "backing off before retry");
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ChatError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    Err(match last_error {
        Some(ChatError::Timeout(after)) => ChatError::Timeout(after),
        Some(e) => ChatError::MaxRetriesExceeded {
            attempts,
            last: e.to_string(),
        },
        None => ChatError::MaxRetriesExceeded {
            attempts,
            last: "no attempt made".to_string(),
        },
    })
}
