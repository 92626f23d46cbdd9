//! Fixed-delay retry policy with a failure-kind exclusion list.

use std::future::Future;
use std::time::Duration;

use crate::error::{Classified, FailureKind};

/// Configuration for the retry policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Plain delay between attempt `n` and `n + 1`.
    pub wait: Duration,
    /// Failure kinds that are never retried.
    pub ignored: Vec<FailureKind>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            wait: Duration::from_millis(500),
            ignored: vec![FailureKind::NotFound, FailureKind::InvalidInput],
        }
    }
}

impl RetryConfig {
    /// Create a configuration with a fixed delay and the default exclusions.
    pub fn fixed(wait: Duration, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            wait,
            ..Self::default()
        }
    }

    /// Single attempt, no waiting.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            wait: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Check if a failure of the given kind should trigger another attempt.
    pub fn should_retry(&self, kind: FailureKind) -> bool {
        !self.ignored.contains(&kind)
    }
}

/// Named retry policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    name: &'static str,
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(name: &'static str, config: RetryConfig) -> Self {
        Self { name, config }
    }

    /// Runs `operation` until it succeeds, fails with an excluded kind, or
    /// attempts run out. The last failure is returned on exhaustion.
    pub async fn execute<T, E, F, Fut>(&self, mut operation: F) -> Result<T, E>
    where
        E: Classified + std::fmt::Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => {
                    let kind = error.failure_kind();
                    if !self.config.should_retry(kind) {
                        tracing::debug!(policy = self.name, attempt, kind = %kind, "failure excluded from retry");
                        return Err(error);
                    }
                    if attempt >= max_attempts {
                        tracing::warn!(policy = self.name, attempt, error = %error, "retry attempts exhausted");
                        return Err(error);
                    }

                    tracing::warn!(
                        policy = self.name,
                        attempt,
                        max_attempts,
                        wait_ms = self.config.wait.as_millis() as u64,
                        error = %error,
                        "attempt failed; retrying"
                    );
                    tokio::time::sleep(self.config.wait).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Instant;

    use thiserror::Error;

    use super::*;

    #[derive(Debug, Error)]
    #[error("{0:?}")]
    struct TestError(FailureKind);

    impl Classified for TestError {
        fn failure_kind(&self) -> FailureKind {
            self.0
        }
    }

    #[test]
    fn default_config_matches_airport_policy() {
        let config = RetryConfig::default();

        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.wait, Duration::from_millis(500));
        assert!(!config.should_retry(FailureKind::NotFound));
        assert!(!config.should_retry(FailureKind::InvalidInput));
        assert!(config.should_retry(FailureKind::UpstreamFailure));
        assert!(config.should_retry(FailureKind::CircuitOpen));
    }

    #[tokio::test]
    async fn retries_until_success() {
        let policy = RetryPolicy::new("test", RetryConfig::fixed(Duration::from_millis(1), 3));
        let calls = AtomicU32::new(0);

        let result = policy
            .execute(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt < 3 {
                        Err(TestError(FailureKind::UpstreamFailure))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;

        assert_eq!(result.expect("third attempt succeeds"), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn excluded_kind_fails_fast() {
        let policy = RetryPolicy::new("test", RetryConfig::fixed(Duration::from_millis(1), 3));
        let calls = AtomicU32::new(0);

        let result: Result<(), TestError> = policy
            .execute(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(TestError(FailureKind::NotFound)) }
            })
            .await;

        assert_eq!(result.expect_err("must fail").0, FailureKind::NotFound);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhaustion_returns_last_failure_after_fixed_waits() {
        let policy = RetryPolicy::new("test", RetryConfig::fixed(Duration::from_millis(40), 3));
        let started = Instant::now();
        let calls = AtomicU32::new(0);

        let result: Result<(), TestError> = policy
            .execute(|attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 3 {
                        Err(TestError(FailureKind::CircuitOpen))
                    } else {
                        Err(TestError(FailureKind::UpstreamFailure))
                    }
                }
            })
            .await;

        assert_eq!(result.expect_err("must fail").0, FailureKind::CircuitOpen);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(started.elapsed() >= Duration::from_millis(80));
    }

    #[tokio::test]
    async fn zero_max_attempts_still_runs_once() {
        let policy = RetryPolicy::new(
            "test",
            RetryConfig {
                max_attempts: 0,
                ..RetryConfig::no_retry()
            },
        );
        let calls = AtomicU32::new(0);

        let result: Result<(), TestError> = policy
            .execute(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(TestError(FailureKind::UpstreamFailure)) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
