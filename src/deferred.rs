// src/deferred.rs

// a throttle slot that is declared first and configured later

// dependencies
use crate::clock::{Clock, MonotonicClock};
use crate::config::ThrottleConfig;
use crate::errors::ThrottleError;
use crate::throttle::{Admission, Throttle};
use std::sync::OnceLock;
use std::time::Duration;

/// A throttle that must be initialized exactly once before use.
///
/// Useful when the limit is only known once the process has started but the
/// throttle has to be declared up front, e.g. in a `static`:
///
/// ```rust
/// use etl_throttle::DeferredThrottle;
///
/// static UPSTREAM: DeferredThrottle = DeferredThrottle::new();
///
/// UPSTREAM.initialize(3, 10).unwrap();
/// let wait = UPSTREAM.next_wait();
/// assert!(wait.is_zero());
/// ```
///
/// Requesting admission before [`initialize`](Self::initialize) is a
/// programming error and panics.
#[derive(Debug)]
pub struct DeferredThrottle<C = MonotonicClock>
where
    C: Clock,
{
    inner: OnceLock<Throttle<C>>,
}

impl DeferredThrottle<MonotonicClock> {
    /// Initialize with `limit` calls per `window_seconds`.
    ///
    /// # Panics
    ///
    /// Panics if `limit` or `window_seconds` is zero, like [`Throttle::new`].
    pub fn initialize(&self, limit: usize, window_seconds: u64) -> Result<(), ThrottleError> {
        self.install(Throttle::new(limit, window_seconds))
    }

    /// See [`Throttle::next_wait`].
    ///
    /// # Panics
    ///
    /// Panics if the throttle has not been initialized.
    pub fn next_wait(&self) -> Duration {
        self.initialized().next_wait()
    }
}

impl<C> DeferredThrottle<C>
where
    C: Clock,
{
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Initialize from a config object, reporting invalid values as errors.
    pub fn initialize_with(&self, config: ThrottleConfig, clock: C) -> Result<(), ThrottleError> {
        self.install(Throttle::with_config(config, clock)?)
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.get().is_some()
    }

    pub fn get(&self) -> Option<&Throttle<C>> {
        self.inner.get()
    }

    /// See [`Throttle::request_admission`].
    ///
    /// # Panics
    ///
    /// Panics if the throttle has not been initialized.
    pub fn request_admission(&self) -> Result<Duration, ThrottleError> {
        self.initialized().request_admission()
    }

    /// See [`Throttle::admit`].
    ///
    /// # Panics
    ///
    /// Panics if the throttle has not been initialized.
    pub fn admit(&self) -> Result<Admission, ThrottleError> {
        self.initialized().admit()
    }

    fn install(&self, throttle: Throttle<C>) -> Result<(), ThrottleError> {
        self.inner
            .set(throttle)
            .map_err(|_| ThrottleError::AlreadyInitialized)
    }

    fn initialized(&self) -> &Throttle<C> {
        match self.inner.get() {
            Some(throttle) => throttle,
            None => panic!("throttle used before initialize() was called"),
        }
    }
}

impl<C> Default for DeferredThrottle<C>
where
    C: Clock,
{
    fn default() -> Self {
        Self::new()
    }
}
