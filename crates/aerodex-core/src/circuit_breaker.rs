//! Count-based sliding-window circuit breaker.

use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;

/// Runtime circuit state for the upstream route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::HalfOpen => "half_open",
        }
    }
}

impl Display for CircuitState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Circuit breaker thresholds and timers.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitBreakerConfig {
    /// Failure percentage (0-100) at or above which the circuit opens.
    pub failure_rate_threshold: f32,
    /// Number of most recent call outcomes kept while closed.
    pub sliding_window_size: usize,
    /// Outcomes required before the failure rate is evaluated.
    pub minimum_calls: usize,
    /// Time spent open before trial calls are let through.
    pub open_wait: Duration,
    /// Trial calls permitted while half-open.
    pub half_open_calls: usize,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_rate_threshold: 50.0,
            sliding_window_size: 10,
            minimum_calls: 5,
            open_wait: Duration::from_secs(30),
            half_open_calls: 10,
        }
    }
}

/// Error produced by [`CircuitBreaker::call`].
#[derive(Debug, Error)]
pub enum CircuitError<E> {
    #[error("circuit breaker '{name}' is open")]
    Open { name: &'static str },

    #[error(transparent)]
    Call(E),
}

#[derive(Debug)]
struct CircuitInner {
    state: CircuitState,
    // true = failure
    window: VecDeque<bool>,
    opened_at: Option<Instant>,
    trial_permits: usize,
    // Bumped on every transition; outcomes from an older epoch are dropped.
    epoch: u64,
}

impl CircuitInner {
    fn new(capacity: usize) -> Self {
        Self {
            state: CircuitState::Closed,
            window: VecDeque::with_capacity(capacity),
            opened_at: None,
            trial_permits: 0,
            epoch: 0,
        }
    }

    fn failure_rate(&self) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }
        let failures = self.window.iter().filter(|failed| **failed).count();
        failures as f32 * 100.0 / self.window.len() as f32
    }

    fn transition(&mut self, name: &'static str, to: CircuitState) {
        let from = self.state;
        self.state = to;
        self.epoch = self.epoch.wrapping_add(1);
        self.window.clear();
        self.trial_permits = 0;
        self.opened_at = (to == CircuitState::Open).then(Instant::now);

        match to {
            CircuitState::Open => tracing::warn!(policy = name, from = %from, "circuit opened"),
            CircuitState::HalfOpen => {
                tracing::info!(policy = name, from = %from, "circuit half-open; allowing trial calls")
            }
            CircuitState::Closed => tracing::info!(policy = name, from = %from, "circuit closed"),
        }
    }
}

/// Thread-safe circuit breaker shared by every lookup on one upstream route.
///
/// Permission checks, outcome accounting, and state transitions all happen
/// under one lock, so concurrent callers never observe a half-applied
/// transition.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: &'static str,
    config: CircuitBreakerConfig,
    inner: Mutex<CircuitInner>,
}

impl CircuitBreaker {
    pub fn new(name: &'static str, config: CircuitBreakerConfig) -> Self {
        let capacity = config.sliding_window_size.max(1);
        Self {
            name,
            config,
            inner: Mutex::new(CircuitInner::new(capacity)),
        }
    }

    /// Runs `operation` if the circuit lets it through.
    ///
    /// Errors for which `counts_as_failure` returns `false` are recorded as
    /// successful calls: the upstream answered, just not with a value.
    pub async fn call<T, E, F, Fut>(
        &self,
        operation: F,
        counts_as_failure: impl Fn(&E) -> bool,
    ) -> Result<T, CircuitError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let Some(epoch) = self.acquire() else {
            return Err(CircuitError::Open { name: self.name });
        };

        let mut permit = PermitGuard {
            breaker: self,
            epoch,
            settled: false,
        };
        let result = operation().await;
        permit.settled = true;

        match result {
            Ok(value) => {
                self.record(Some(epoch), false);
                Ok(value)
            }
            Err(error) => {
                self.record(Some(epoch), counts_as_failure(&error));
                Err(CircuitError::Call(error))
            }
        }
    }

    /// Takes a call permit, moving an expired open circuit to half-open.
    pub fn allow_request(&self) -> bool {
        self.acquire().is_some()
    }

    // Returns the epoch the permit belongs to.
    fn acquire(&self) -> Option<u64> {
        let mut inner = self.inner.lock();
        let admitted = match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let can_probe = inner
                    .opened_at
                    .map(|opened_at| opened_at.elapsed() >= self.config.open_wait)
                    .unwrap_or(false);

                if can_probe {
                    inner.transition(self.name, CircuitState::HalfOpen);
                    inner.trial_permits = 1;
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => {
                if inner.trial_permits < self.config.half_open_calls.max(1) {
                    inner.trial_permits += 1;
                    true
                } else {
                    false
                }
            }
        };
        admitted.then_some(inner.epoch)
    }

    /// Records a success against the current state.
    pub fn record_success(&self) {
        self.record(None, false);
    }

    /// Records a failure against the current state.
    pub fn record_failure(&self) {
        self.record(None, true);
    }

    fn record(&self, admitted_in: Option<u64>, failed: bool) {
        let mut inner = self.inner.lock();
        if admitted_in.is_some_and(|epoch| epoch != inner.epoch) {
            // Admitted before the last transition; not part of this window.
            return;
        }
        match inner.state {
            CircuitState::Open => {}
            CircuitState::Closed => {
                inner.window.push_back(failed);
                while inner.window.len() > self.config.sliding_window_size.max(1) {
                    inner.window.pop_front();
                }

                let minimum = self
                    .config
                    .minimum_calls
                    .clamp(1, self.config.sliding_window_size.max(1));
                if inner.window.len() >= minimum
                    && inner.failure_rate() >= self.config.failure_rate_threshold
                {
                    tracing::warn!(
                        policy = self.name,
                        failure_rate = inner.failure_rate(),
                        calls = inner.window.len(),
                        "failure rate threshold reached"
                    );
                    inner.transition(self.name, CircuitState::Open);
                }
            }
            CircuitState::HalfOpen => {
                inner.window.push_back(failed);
                if inner.window.len() >= self.config.half_open_calls.max(1) {
                    let next = if inner.failure_rate() >= self.config.failure_rate_threshold {
                        CircuitState::Open
                    } else {
                        CircuitState::Closed
                    };
                    inner.transition(self.name, next);
                }
            }
        }
    }

    fn release_permit(&self, epoch: u64) {
        let mut inner = self.inner.lock();
        if inner.epoch == epoch && inner.state == CircuitState::HalfOpen {
            inner.trial_permits = inner.trial_permits.saturating_sub(1);
        }
    }

    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    /// Failure percentage of the outcomes currently in the window.
    pub fn failure_rate(&self) -> f32 {
        self.inner.lock().failure_rate()
    }

    /// Number of outcomes currently in the window.
    pub fn buffered_calls(&self) -> usize {
        self.inner.lock().window.len()
    }
}

// Hands a half-open trial permit back if the call future is dropped before
// it produced an outcome.
struct PermitGuard<'a> {
    breaker: &'a CircuitBreaker,
    epoch: u64,
    settled: bool,
}

impl Drop for PermitGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.breaker.release_permit(self.epoch);
        }
    }
}
