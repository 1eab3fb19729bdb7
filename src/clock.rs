// src/clock.rs

// clock abstraction used by the throttle to read the current instant

// dependencies
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Clock trait to abstract time retrieval.
/// Implementors must be thread-safe (Send + Sync).
/// The `now` method returns the current instant in nanoseconds as a u64.
/// The throttle only compares and subtracts instants from the same clock, so the
/// epoch is up to the implementation.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<u64, ClockError>;
}

/// Clock error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("system time is before the Unix epoch")]
    SystemTimeError,
}

/// Monotonic clock measuring nanoseconds since the clock was created.
///
/// This is the default clock for [`Throttle`](crate::Throttle): it never goes
/// backwards, so reservations in the history stay ordered, and it never fails.
/// Clones share the same anchor and therefore agree on the current instant.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    anchor: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            anchor: Instant::now(),
        }
    }

    /// Nanoseconds since this clock was created
    pub fn elapsed_nanos(&self) -> u64 {
        u64::try_from(self.anchor.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Result<u64, ClockError> {
        Ok(self.elapsed_nanos())
    }
}

/// SystemClock implementation using the wall clock.
/// Returns the current time in nanoseconds since the Unix epoch.
/// Wall-clock steps backwards make a throttle more conservative for one window.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<u64, ClockError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
            .map_err(|_| ClockError::SystemTimeError)
    }
}
