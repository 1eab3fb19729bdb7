// src/errors.rs

// error handling for the throttle types

// dependencies
use crate::clock::ClockError;

/// Error type for throttle configuration and clock issues.
///
/// Contract violations (a zero limit passed to [`Throttle::new`](crate::Throttle::new),
/// admission through an uninitialised [`DeferredThrottle`](crate::DeferredThrottle))
/// panic instead of surfacing here.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThrottleError {
    /// limit == 0
    #[error("Limit must be positive")]
    InvalidLimit,
    /// window is zero
    #[error("Window must be positive")]
    InvalidWindow,
    #[error("Throttle is already initialized")]
    AlreadyInitialized,
    #[error("Clock error occurred: {0}")]
    Clock(#[from] ClockError),
}
