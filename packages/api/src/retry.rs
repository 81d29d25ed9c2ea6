//! Bounded exponential backoff for silent token revalidation.
//!
//! The policy is a plain value, independent of any UI concurrency primitive,
//! so the session manager's retry loop is unit-testable without a network or
//! a real clock (tests use a zero base delay).

use std::time::Duration;

use crate::config::RetryConfig;

/// A bounded-retry policy: at most `max_attempts` tries, with delay
/// `base_delay * 2^(attempt - 1)` between consecutive attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor)
    }

    /// Sleep for [`RetryPolicy::delay_for`] the given attempt.
    pub async fn wait(&self, attempt: u32) {
        let delay = self.delay_for(attempt);
        if delay.is_zero() {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        gloo_timers::future::sleep(delay).await;
        #[cfg(not(target_arch = "wasm32"))]
        tokio::time::sleep(delay).await;
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_millis(config.base_delay_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_per_attempt() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1_000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2_000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(4_000));
    }

    #[test]
    fn from_config_picks_up_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(1_000));
    }

    #[tokio::test]
    async fn zero_delay_wait_returns_immediately() {
        let policy = RetryPolicy::new(3, Duration::ZERO);
        policy.wait(1).await;
        policy.wait(3).await;
    }
}
