//! Rate-limit backoff schedule.
//!
//! Attempt `n` (zero-based) that is rate limited waits `base * 2^n` plus a
//! uniformly random jitter in `[0, max_jitter)` before attempt `n + 1`. The
//! jitter keeps concurrent lookups that hit the same limit from retrying in
//! lockstep.

use std::time::Duration;

use rand::Rng;

use crate::config::{RETRY_BACKOFF_BASE_MS, RETRY_MAX_ATTEMPTS, RETRY_MAX_JITTER_MS};

/// Retry ceiling and delay schedule for rate-limited lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffPolicy {
    max_attempts: usize,
    base: Duration,
    max_jitter: Duration,
}

impl BackoffPolicy {
    /// Creates a policy. `max_attempts` counts the initial attempt and is at least 1.
    pub fn new(max_attempts: usize, base: Duration, max_jitter: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base,
            max_jitter,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    pub fn max_jitter(&self) -> Duration {
        self.max_jitter
    }

    /// Delay before the attempt following `attempt`, without jitter.
    pub fn nominal_delay(&self, attempt: usize) -> Duration {
        let exponent = u32::try_from(attempt).unwrap_or(u32::MAX);
        self.base.saturating_mul(2u32.saturating_pow(exponent))
    }

    /// Random jitter in `[0, max_jitter)`, millisecond granularity.
    pub fn jitter(&self) -> Duration {
        let max_ms = u64::try_from(self.max_jitter.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::rng().random_range(0..max_ms))
    }

    /// Full delay (nominal plus jitter) after rate-limited attempt `attempt`.
    pub fn delay_for(&self, attempt: usize) -> Duration {
        self.nominal_delay(attempt).saturating_add(self.jitter())
    }

    /// Sleep schedule for `tokio_retry`: one delay between each pair of attempts.
    ///
    /// There is no delay after the final attempt, so the iterator yields
    /// `max_attempts - 1` items. Jitter is drawn lazily, when each delay is needed.
    pub fn strategy(&self) -> impl Iterator<Item = Duration> {
        let policy = self.clone();
        (0..self.max_attempts - 1).map(move |attempt| policy.delay_for(attempt))
    }

    /// Longest possible time a single probe can spend sleeping under this policy.
    pub fn worst_case_total(&self) -> Duration {
        (0..self.max_attempts - 1)
            .map(|attempt| self.nominal_delay(attempt).saturating_add(self.max_jitter))
            .sum()
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(
            RETRY_MAX_ATTEMPTS,
            Duration::from_millis(RETRY_BACKOFF_BASE_MS),
            Duration::from_millis(RETRY_MAX_JITTER_MS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.base(), Duration::from_secs(1));
        assert_eq!(policy.max_jitter(), Duration::from_millis(1000));
    }

    #[test]
    fn test_nominal_delays_double() {
        let policy = BackoffPolicy::default();
        let delays: Vec<u64> = (0..5).map(|a| policy.nominal_delay(a).as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn test_jitter_within_bounds() {
        let policy = BackoffPolicy::default();
        for _ in 0..1000 {
            let jitter = policy.jitter();
            assert!(jitter < Duration::from_millis(1000), "jitter {:?}", jitter);
        }
    }

    #[test]
    fn test_zero_jitter() {
        let policy = BackoffPolicy::new(3, Duration::from_millis(10), Duration::ZERO);
        assert_eq!(policy.jitter(), Duration::ZERO);
        assert_eq!(policy.delay_for(2), Duration::from_millis(40));
    }

    #[test]
    fn test_delay_includes_jitter() {
        let policy = BackoffPolicy::default();
        for attempt in 0..5 {
            let delay = policy.delay_for(attempt);
            let nominal = policy.nominal_delay(attempt);
            assert!(delay >= nominal);
            assert!(delay < nominal + Duration::from_millis(1000));
        }
    }

    #[test]
    fn test_strategy_has_one_delay_between_attempts() {
        let policy = BackoffPolicy::new(5, Duration::from_millis(100), Duration::ZERO);
        let delays: Vec<Duration> = policy.strategy().collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(400),
                Duration::from_millis(800),
            ]
        );
    }

    #[test]
    fn test_single_attempt_policy_never_sleeps() {
        let policy = BackoffPolicy::new(0, Duration::from_secs(1), Duration::ZERO);
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.strategy().count(), 0);
        assert_eq!(policy.worst_case_total(), Duration::ZERO);
    }

    #[test]
    fn test_worst_case_total() {
        let policy = BackoffPolicy::default();
        // 1 + 2 + 4 + 8 seconds plus four full jitter windows
        assert_eq!(policy.worst_case_total(), Duration::from_secs(19));
    }

    #[test]
    fn test_huge_attempt_saturates() {
        let policy = BackoffPolicy::default();
        assert!(policy.nominal_delay(200) >= policy.nominal_delay(31));
        let _ = policy.delay_for(200);
    }
}
