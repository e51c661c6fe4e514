//! Circuit breaker for upstream protection.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: upstream assumed down, calls fail fast to the fallback
//! - Half-Open: limited trial calls test whether the upstream recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: failure rate over the trailing window ≥ threshold,
//!                with at least min_samples recorded
//! Open → Half-Open: after open_wait elapses
//! Half-Open → Closed: trial success rate ≥ threshold (window reset)
//! Half-Open → Open: trial success rate below threshold (wait restarts)
//! ```
//!
//! # Design Decisions
//! - One breaker per named circuit, held in an injected registry
//! - Per-circuit state under a single `Mutex`; callers `try_acquire` a
//!   permit before the network call and report the outcome after
//! - Fail fast in Open state: no network attempt is made

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::config::{CircuitBreakerConfig, SharedConfig};

/// Current mode of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Tuning knobs of one circuit, fixed at creation.
#[derive(Debug, Clone)]
pub struct CircuitSettings {
    pub window_size: usize,
    pub min_samples: usize,
    pub failure_rate_threshold: f64,
    pub open_wait: Duration,
    pub half_open_max_calls: u32,
    pub half_open_success_threshold: f64,
}

impl From<&CircuitBreakerConfig> for CircuitSettings {
    fn from(config: &CircuitBreakerConfig) -> Self {
        Self {
            window_size: config.window_size,
            min_samples: config.min_samples,
            failure_rate_threshold: config.failure_rate_threshold,
            open_wait: Duration::from_millis(config.open_wait_ms),
            half_open_max_calls: config.half_open_max_calls,
            half_open_success_threshold: config.half_open_success_threshold,
        }
    }
}

/// Trailing window of call outcomes (`true` = success).
#[derive(Debug)]
struct Window {
    outcomes: VecDeque<bool>,
    capacity: usize,
}

impl Window {
    fn new(capacity: usize) -> Self {
        Self {
            outcomes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn record(&mut self, ok: bool) {
        if self.outcomes.len() == self.capacity {
            self.outcomes.pop_front();
        }
        self.outcomes.push_back(ok);
    }

    fn len(&self) -> usize {
        self.outcomes.len()
    }

    fn failure_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let failures = self.outcomes.iter().filter(|ok| !**ok).count();
        failures as f64 / self.outcomes.len() as f64
    }

    fn clear(&mut self) {
        self.outcomes.clear();
    }
}

#[derive(Debug)]
struct Inner {
    state: CircuitState,
    window: Window,
    opened_at: Option<Instant>,
    trial_permits: u32,
    trial_successes: u32,
    trial_failures: u32,
}

/// One named circuit.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    settings: CircuitSettings,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, settings: CircuitSettings) -> Self {
        let window = Window::new(settings.window_size);
        Self {
            name: name.into(),
            settings,
            inner: Mutex::new(Inner {
                state: CircuitState::Closed,
                window,
                opened_at: None,
                trial_permits: 0,
                trial_successes: 0,
                trial_failures: 0,
            }),
        }
    }

    /// Ask for a call permit. `false` means the caller must serve the
    /// fallback without attempting the network call.
    pub fn try_acquire(&self) -> bool {
        let mut inner = self.inner.lock().expect("circuit lock poisoned");
        match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let waited = inner
                    .opened_at
                    .map(|at| at.elapsed() >= self.settings.open_wait)
                    .unwrap_or(true);
                if waited {
                    self.enter_half_open(&mut inner);
                    inner.trial_permits -= 1;
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => {
                if inner.trial_permits > 0 {
                    inner.trial_permits -= 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Report a successful call outcome.
    pub fn record_success(&self) {
        self.record(true);
    }

    /// Report a failed call outcome.
    pub fn record_failure(&self) {
        self.record(false);
    }

    /// Current mode (for status endpoints and tests).
    pub fn state(&self) -> CircuitState {
        self.inner.lock().expect("circuit lock poisoned").state
    }

    fn enter_half_open(&self, inner: &mut Inner) {
        inner.state = CircuitState::HalfOpen;
        inner.trial_permits = self.settings.half_open_max_calls;
        inner.trial_successes = 0;
        inner.trial_failures = 0;
        tracing::info!(circuit = %self.name, "circuit half-open, admitting trial calls");
    }

    fn record(&self, ok: bool) {
        let mut inner = self.inner.lock().expect("circuit lock poisoned");
        match inner.state {
            CircuitState::Closed => {
                inner.window.record(ok);
                if !ok
                    && inner.window.len() >= self.settings.min_samples
                    && inner.window.failure_rate() >= self.settings.failure_rate_threshold
                {
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(Instant::now());
                    tracing::warn!(
                        circuit = %self.name,
                        failure_rate = inner.window.failure_rate(),
                        "circuit opened"
                    );
                }
            }
            CircuitState::HalfOpen => {
                if ok {
                    inner.trial_successes += 1;
                } else {
                    inner.trial_failures += 1;
                }
                let done = inner.trial_successes + inner.trial_failures;
                if done >= self.settings.half_open_max_calls {
                    let rate = f64::from(inner.trial_successes) / f64::from(done);
                    if rate >= self.settings.half_open_success_threshold {
                        inner.state = CircuitState::Closed;
                        inner.opened_at = None;
                        inner.window.clear();
                        tracing::info!(circuit = %self.name, "circuit closed after successful trials");
                    } else {
                        inner.state = CircuitState::Open;
                        inner.opened_at = Some(Instant::now());
                        tracing::warn!(circuit = %self.name, "trial calls failed, circuit reopened");
                    }
                }
            }
            // Late outcome from a call admitted before the circuit opened.
            CircuitState::Open => {}
        }
    }
}

/// Concurrency-safe registry of named circuits, created lazily from the
/// current config snapshot.
#[derive(Debug)]
pub struct CircuitRegistry {
    circuits: DashMap<String, Arc<CircuitBreaker>>,
    config: SharedConfig,
}

impl CircuitRegistry {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            circuits: DashMap::new(),
            config,
        }
    }

    /// The circuit with the given name, creating it on first use with the
    /// tuning from the config snapshot at that moment.
    pub fn get(&self, name: &str) -> Arc<CircuitBreaker> {
        self.circuits
            .entry(name.to_string())
            .or_insert_with(|| {
                let settings = CircuitSettings::from(&self.config.snapshot().circuit_breaker);
                Arc::new(CircuitBreaker::new(name, settings))
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(open_wait: Duration) -> CircuitSettings {
        CircuitSettings {
            window_size: 4,
            min_samples: 4,
            failure_rate_threshold: 0.5,
            open_wait,
            half_open_max_calls: 2,
            half_open_success_threshold: 0.5,
        }
    }

    fn breaker(open_wait: Duration) -> CircuitBreaker {
        CircuitBreaker::new("testCB", settings(open_wait))
    }

    fn fail(cb: &CircuitBreaker) {
        assert!(cb.try_acquire());
        cb.record_failure();
    }

    fn succeed(cb: &CircuitBreaker) {
        assert!(cb.try_acquire());
        cb.record_success();
    }

    #[test]
    fn test_stays_closed_below_min_samples() {
        let cb = breaker(Duration::from_secs(60));
        fail(&cb);
        fail(&cb);
        fail(&cb);
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[test]
    fn test_opens_at_threshold_with_min_samples() {
        let cb = breaker(Duration::from_secs(60));
        succeed(&cb);
        succeed(&cb);
        fail(&cb);
        assert_eq!(cb.state(), CircuitState::Closed);
        // fourth sample brings the rate to 0.5 over a full window
        fail(&cb);
        assert_eq!(cb.state(), CircuitState::Open);
    }

    #[test]
    fn test_open_rejects_without_permit() {
        let cb = breaker(Duration::from_secs(60));
        for _ in 0..4 {
            fail(&cb);
        }
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(!cb.try_acquire());
        assert!(!cb.try_acquire());
    }

    #[test]
    fn test_open_admits_trial_after_wait() {
        let cb = breaker(Duration::from_millis(20));
        for _ in 0..4 {
            fail(&cb);
        }
        assert!(!cb.try_acquire());

        std::thread::sleep(Duration::from_millis(30));
        assert!(cb.try_acquire());
        assert_eq!(cb.state(), CircuitState::HalfOpen);
    }

    #[test]
    fn test_half_open_closes_on_successful_trials() {
        let cb = breaker(Duration::from_millis(10));
        for _ in 0..4 {
            fail(&cb);
        }
        std::thread::sleep(Duration::from_millis(20));

        succeed(&cb);
        assert_eq!(cb.state(), CircuitState::HalfOpen);
        succeed(&cb);
        assert_eq!(cb.state(), CircuitState::Closed);

        // window was reset: old failures no longer count
        fail(&cb);
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[test]
    fn test_half_open_reopens_on_failed_trials() {
        let cb = breaker(Duration::from_millis(10));
        for _ in 0..4 {
            fail(&cb);
        }
        std::thread::sleep(Duration::from_millis(20));

        fail(&cb);
        fail(&cb);
        assert_eq!(cb.state(), CircuitState::Open);
        // wait timer restarted
        assert!(!cb.try_acquire());
    }

    #[test]
    fn test_half_open_caps_trial_permits() {
        let cb = breaker(Duration::from_millis(10));
        for _ in 0..4 {
            fail(&cb);
        }
        std::thread::sleep(Duration::from_millis(20));

        assert!(cb.try_acquire());
        assert!(cb.try_acquire());
        // both permits taken, outcomes still pending
        assert!(!cb.try_acquire());
    }

    #[test]
    fn test_registry_returns_same_circuit_per_name() {
        let registry = CircuitRegistry::new(SharedConfig::new(Default::default()));
        let a = registry.get("produitsCB");
        let b = registry.get("produitsCB");
        let other = registry.get("commandesCB");
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &other));
    }
}
