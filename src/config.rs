// src/config.rs

//! Configuration types for the throttle

// dependencies
use crate::errors::ThrottleError;
use std::time::Duration;

/// Configuration for throttle behavior: at most `limit` admissions in any
/// rolling `window`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub(crate) limit: usize,
    pub(crate) window: Duration,
}

impl ThrottleConfig {
    /// Create a new configuration allowing `limit` calls per `window_seconds`
    pub fn new(limit: usize, window_seconds: u64) -> Self {
        Self {
            limit,
            window: Duration::from_secs(window_seconds),
        }
    }

    /// Builder-style: set the admission limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Builder-style: set the window, allowing sub-second precision
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Builder-style: set the window in whole seconds
    pub fn window_seconds(mut self, window_seconds: u64) -> Self {
        self.window = Duration::from_secs(window_seconds);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ThrottleError> {
        if self.limit == 0 {
            return Err(ThrottleError::InvalidLimit);
        }
        if self.window.is_zero() {
            return Err(ThrottleError::InvalidWindow);
        }
        Ok(())
    }
}
