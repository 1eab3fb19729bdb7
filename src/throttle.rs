// src/throttle.rs

// etl-throttle: a sliding-log call-rate throttle.

// dependencies
use crate::clock::{Clock, MonotonicClock};
use crate::config::ThrottleConfig;
use crate::errors::ThrottleError;
use crate::history::History;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::trace;

/// The main Throttle model.
///
/// Guarantees that callers honoring the returned wait never perform more than
/// `limit` calls inside any rolling `window`. Each admission reserves an
/// instant in a bounded history before the caller starts waiting, so
/// concurrent callers see each other's pending reservations.
/// C is the clock type, defaulting to MonotonicClock.
#[derive(Debug)]
pub struct Throttle<C = MonotonicClock>
where
    C: Clock,
{
    limit: usize,
    window_nanos: u64,
    history: Mutex<History>,
    clock: C,
}

impl Throttle<MonotonicClock> {
    /// Create a throttle allowing `limit` calls per `window_seconds`.
    ///
    /// # Panics
    ///
    /// Panics if `limit` or `window_seconds` is zero. These are deployment
    /// constants; use [`Throttle::with_config`] for values read at runtime.
    pub fn new(limit: usize, window_seconds: u64) -> Self {
        assert!(limit > 0, "throttle limit must be positive");
        assert!(window_seconds > 0, "throttle window must be positive");
        Self::build(
            limit,
            Duration::from_secs(window_seconds),
            MonotonicClock::new(),
        )
    }

    /// Infallible [`request_admission`](Throttle::request_admission): the
    /// monotonic clock cannot fail.
    pub fn next_wait(&self) -> Duration {
        let mut history = self.lock_history();
        let now = self.clock.elapsed_nanos();
        self.reserve(&mut history, now).wait
    }
}

// methods for the Throttle type
impl<C> Throttle<C>
where
    C: Clock,
{
    // config must already be validated
    pub(crate) fn build(limit: usize, window: Duration, clock: C) -> Self {
        Self {
            limit,
            window_nanos: saturating_nanos(window),
            history: Mutex::new(History::with_capacity(limit)),
            clock,
        }
    }

    // method to create a new throttle from a config object
    pub fn with_config(config: ThrottleConfig, clock: C) -> Result<Self, ThrottleError> {
        config.validate()?;
        Ok(Self::build(config.limit, config.window, clock))
    }

    /// Maximum admissions per window
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Length of the rolling window
    pub fn window(&self) -> Duration {
        Duration::from_nanos(self.window_nanos)
    }

    /// Number of admissions currently recorded (at most `limit`)
    pub fn pending(&self) -> usize {
        self.lock_history().len()
    }

    /// Most recently reserved instant, in the clock's nanoseconds
    pub fn last_reservation_nanos(&self) -> Option<u64> {
        self.lock_history().back()
    }

    /// Ask for permission to call the throttled resource.
    ///
    /// Returns how long the caller must wait before calling. The throttle does
    /// not sleep; the reservation is already committed when this returns.
    pub fn request_admission(&self) -> Result<Duration, ThrottleError> {
        self.admit().map(|admission| admission.wait)
    }

    /// Same as [`request_admission`](Self::request_admission), also reporting
    /// the instant reserved for this caller.
    pub fn admit(&self) -> Result<Admission, ThrottleError> {
        let mut history = self.lock_history();
        let now = self.clock.now()?;
        Ok(self.reserve(&mut history, now))
    }

    // `now` must be read while `history` is locked
    fn reserve(&self, history: &mut History, now: u64) -> Admission {
        let scheduled_at_nanos = if history.is_full() {
            // only the oldest entry is aged out per call
            let oldest = history.pop_front().unwrap_or(now);
            oldest.saturating_add(self.window_nanos).max(now)
        } else {
            now
        };
        let stored = history.push_back(scheduled_at_nanos);
        debug_assert!(stored, "history has a free slot after aging out");

        let wait = Duration::from_nanos(scheduled_at_nanos - now);
        if !wait.is_zero() {
            trace!(
                wait_ms = saturating_millis(wait),
                pending = history.len(),
                "admission deferred"
            );
        }

        Admission {
            wait,
            scheduled_at_nanos,
        }
    }

    // true when every reservation aged out of the window at least `max_idle_nanos` ago
    pub(crate) fn is_idle_at(&self, now: u64, max_idle_nanos: u64) -> bool {
        match self.last_reservation_nanos() {
            None => true,
            Some(last) => {
                last.saturating_add(self.window_nanos)
                    .saturating_add(max_idle_nanos)
                    <= now
            }
        }
    }

    // every critical section leaves the ring buffer consistent, so poisoning is ignored
    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) fn saturating_nanos(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}

pub(crate) fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Result of an admission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    /// How long the caller must wait before acting
    pub wait: Duration,
    /// Instant reserved in the history for this caller (clock nanoseconds)
    pub scheduled_at_nanos: u64,
}

impl Admission {
    /// Whether the caller may act right away
    pub fn is_immediate(&self) -> bool {
        self.wait.is_zero()
    }
}
