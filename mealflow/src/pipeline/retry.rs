//! Retry controller with capped exponential backoff.

use crate::adapters::StepAdapter;
use crate::errors::{StepError, StepFailure};
use std::time::Duration;

/// Backoff schedule for flaky step invocations.
///
/// With the defaults, attempt `n` (for `n >= 2`) is preceded by a delay
/// of `min(10 * 2^(n-2), 60)` seconds: 10, 20, 40, 60, 60, 60, 60. The
/// first attempt always starts immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum invocations per step, counting the first.
    pub max_attempts: usize,
    /// Delay before the second attempt; doubles each retry after that.
    pub base_delay: Duration,
    /// Ceiling on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            base_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Creates the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the attempt cap. A cap of zero means the step is never
    /// invoked and fails immediately.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the delay before the second attempt.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Sets the per-delay ceiling.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Delay to wait before `attempt` (1-based). The first attempt has
    /// no delay.
    #[must_use]
    pub fn backoff_delay(&self, attempt: usize) -> Duration {
        if attempt < 2 {
            return Duration::ZERO;
        }
        let exponent = u32::try_from(attempt - 2).unwrap_or(u32::MAX);
        let doubled = 2u32
            .checked_pow(exponent)
            .map_or(self.max_delay, |factor| self.base_delay.saturating_mul(factor));
        doubled.min(self.max_delay)
    }
}

/// Invokes `adapter` under `policy`, absorbing transient failures.
///
/// Permanent errors abort immediately without consuming further
/// attempts. Returns the adapter's output, or a [`StepFailure`] once the
/// step is definitively lost.
pub async fn invoke_with_retry<A: StepAdapter + ?Sized>(
    policy: &RetryPolicy,
    adapter: &A,
    input: A::Input,
) -> Result<A::Output, StepFailure> {
    let step = adapter.step();
    let mut last_error = String::from("no attempts allowed");

    for attempt in 1..=policy.max_attempts {
        let delay = policy.backoff_delay(attempt);
        if !delay.is_zero() {
            tracing::debug!(%step, attempt, delay_secs = delay.as_secs(), "backing off before retry");
            tokio::time::sleep(delay).await;
        }

        match adapter.invoke(input.clone()).await {
            Ok(output) => {
                if attempt > 1 {
                    tracing::info!(%step, attempt, "step recovered after retries");
                }
                return Ok(output);
            }
            Err(StepError::Permanent(message)) => {
                tracing::warn!(%step, attempt, error = %message, "permanent step failure");
                return Err(StepFailure::Permanent(message));
            }
            Err(StepError::Transient(message)) => {
                tracing::warn!(%step, attempt, error = %message, "transient step failure");
                last_error = message;
            }
        }
    }

    tracing::error!(%step, attempts = policy.max_attempts, "retries exhausted");
    Err(StepFailure::RetriesExhausted {
        attempts: policy.max_attempts,
        last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StepName;
    use crate::testing::mocks::StubAdapter;
    use std::time::Duration;

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::default();
        let expected = [0u64, 10, 20, 40, 60, 60, 60, 60];
        for (i, secs) in expected.iter().enumerate() {
            assert_eq!(
                policy.backoff_delay(i + 1),
                Duration::from_secs(*secs),
                "attempt {}",
                i + 1
            );
        }
    }

    #[tokio::test]
    async fn test_success_on_first_attempt_makes_one_call() {
        let adapter: StubAdapter<(), u32> = StubAdapter::ok(StepName::Recipe, 7);
        let policy = RetryPolicy::default();

        let out = invoke_with_retry(&policy, &adapter, ()).await.unwrap();
        assert_eq!(out, 7);
        assert_eq!(adapter.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_then_success_waits_the_schedule() {
        let adapter: StubAdapter<(), u32> =
            StubAdapter::transient_then_ok(StepName::Shopping, 3, 42);
        let policy = RetryPolicy::default();

        let started = tokio::time::Instant::now();
        let out = invoke_with_retry(&policy, &adapter, ()).await.unwrap();

        assert_eq!(out, 42);
        assert_eq!(adapter.call_count(), 4);
        // Delays before attempts 2..=4: 10 + 20 + 40 seconds.
        assert_eq!(started.elapsed(), Duration::from_secs(70));
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_transient_exhausts_all_attempts() {
        let adapter: StubAdapter<(), u32> =
            StubAdapter::transient(StepName::Health, "service busy");
        let policy = RetryPolicy::default();

        let err = invoke_with_retry(&policy, &adapter, ()).await.unwrap_err();
        assert_eq!(adapter.call_count(), 8);
        assert_eq!(
            err,
            StepFailure::RetriesExhausted {
                attempts: 8,
                last_error: "service busy".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_permanent_aborts_without_retrying() {
        let adapter: StubAdapter<(), u32> =
            StubAdapter::permanent(StepName::Preference, "bad input");
        let policy = RetryPolicy::default();

        let err = invoke_with_retry(&policy, &adapter, ()).await.unwrap_err();
        assert_eq!(adapter.call_count(), 1);
        assert_eq!(err, StepFailure::Permanent("bad input".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_policy_caps_attempts() {
        let adapter: StubAdapter<(), u32> = StubAdapter::transient(StepName::Recipe, "down");
        let policy = RetryPolicy::new()
            .with_max_attempts(3)
            .with_base_delay(Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(1));

        let err = invoke_with_retry(&policy, &adapter, ()).await.unwrap_err();
        assert_eq!(adapter.call_count(), 3);
        assert!(matches!(
            err,
            StepFailure::RetriesExhausted { attempts: 3, .. }
        ));
    }
}
